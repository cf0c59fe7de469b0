//! SeaORM entities for the `posts` and `folders` tables.

pub mod folder;
pub mod post;
