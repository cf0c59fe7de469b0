//! Identity integrations.

mod jwt;

pub use jwt::{JwtConfig, JwtTokenService};
