//! # Postline Infrastructure
//!
//! Concrete implementations of the ports defined in `postline-core`.
//! Database, cache, identity, and generation-gateway integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT token validation
//! - `redis` - Redis cache backend

pub mod cache;
pub mod database;
pub mod generation;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{InMemoryFolderRepository, InMemoryPostRepository};
pub use generation::DisabledGenerator;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresFolderRepository, PostgresPostRepository, connect,
};

#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};

pub use generation::{GenerationConfig, HttpContentGenerator};
