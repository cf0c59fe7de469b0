//! Cache backends implementing the core cache port.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemoryCache;

#[cfg(feature = "redis")]
pub use redis::{RedisCache, RedisConfig};
