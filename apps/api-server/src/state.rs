//! Application state - shared across all handlers.

use std::sync::Arc;

use postline_core::ports::{Cache, ContentGenerator, FolderRepository, PostRepository};
use postline_core::service::{FolderService, PostService};
use postline_infra::{
    DisabledGenerator, HttpContentGenerator, InMemoryCache, InMemoryFolderRepository,
    InMemoryPostRepository, PostgresFolderRepository, PostgresPostRepository, RedisCache,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub folders: Arc<FolderService>,
}

impl AppState {
    /// Build the application state, falling back to in-memory adapters for
    /// any backend that is unconfigured or unreachable.
    pub async fn new(config: &AppConfig) -> Self {
        let (post_repo, folder_repo): (Arc<dyn PostRepository>, Arc<dyn FolderRepository>) =
            match &config.database {
                Some(db_config) => match postline_infra::connect(db_config).await {
                    // `DatabaseConnection` only derives `Clone` when sea-orm's
                    // `mock` feature is off. That feature is pulled in by
                    // postline-infra's dev-dependencies and unifies across the
                    // workspace under `cargo test`, so the shared-connection
                    // wiring below only type-checks outside the test build.
                    // `new()` is never invoked in tests (handlers use
                    // `for_tests()`), so the test-only arm is unreachable.
                    #[cfg(not(test))]
                    Ok(conn) => (
                        Arc::new(PostgresPostRepository::new(conn.clone())),
                        Arc::new(PostgresFolderRepository::new(conn)),
                    ),
                    #[cfg(test)]
                    Ok(_conn) => (
                        Arc::new(InMemoryPostRepository::new()),
                        Arc::new(InMemoryFolderRepository::new()),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory stores.",
                            e
                        );
                        (
                            Arc::new(InMemoryPostRepository::new()),
                            Arc::new(InMemoryFolderRepository::new()),
                        )
                    }
                },
                None => {
                    tracing::warn!("DATABASE_URL not set. Running with in-memory stores.");
                    (
                        Arc::new(InMemoryPostRepository::new()),
                        Arc::new(InMemoryFolderRepository::new()),
                    )
                }
            };

        let cache: Arc<dyn Cache> = match &config.redis {
            Some(redis_config) => match RedisCache::new(redis_config.clone()).await {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    tracing::warn!("Redis unavailable: {}. Using in-memory cache.", e);
                    Arc::new(InMemoryCache::new())
                }
            },
            None => Arc::new(InMemoryCache::new()),
        };

        let generator: Arc<dyn ContentGenerator> = match &config.generation {
            Some(generation_config) => match HttpContentGenerator::new(generation_config.clone()) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::warn!("Generation client unusable: {}. Generation disabled.", e);
                    Arc::new(DisabledGenerator)
                }
            },
            None => Arc::new(DisabledGenerator),
        };

        tracing::info!("Application state initialized");

        Self::assemble(post_repo, folder_repo, cache, generator, config)
    }

    fn assemble(
        post_repo: Arc<dyn PostRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        cache: Arc<dyn Cache>,
        generator: Arc<dyn ContentGenerator>,
        config: &AppConfig,
    ) -> Self {
        let posts = Arc::new(
            PostService::new(
                post_repo.clone(),
                folder_repo.clone(),
                cache.clone(),
                generator,
            )
            .with_list_cache_ttl(config.post_cache_ttl),
        );
        let folders = Arc::new(FolderService::new(folder_repo, post_repo, cache));
        Self { posts, folders }
    }

    /// Fully in-memory state for handler tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: None,
            redis: None,
            generation: None,
            post_cache_ttl: std::time::Duration::from_secs(60),
        };
        Self::assemble(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryFolderRepository::new()),
            Arc::new(InMemoryCache::new()),
            Arc::new(DisabledGenerator),
            &config,
        )
    }
}
