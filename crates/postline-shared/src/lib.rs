//! # Postline Shared
//!
//! Wire-facing types shared by the API server and API clients:
//! request DTOs with their validation rules, and the response envelope.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorBody};
