//! HTTP handlers and route configuration.

mod folders;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Dashboard aggregates
            .route("/dashboard/stats", web::get().to(posts::dashboard_stats))
            .route("/schedule", web::get().to(posts::scheduled))
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::list))
                    .route("/generate-content", web::post().to(posts::generate_content))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/schedule", web::post().to(posts::schedule))
                    .route("/{id}/unschedule", web::post().to(posts::unschedule))
                    .route("/{id}/move", web::post().to(posts::move_to_folder))
                    .route("/{id}/duplicate", web::post().to(posts::duplicate)),
            )
            // Folder routes
            .service(
                web::scope("/folders")
                    .route("", web::post().to(folders::create))
                    .route("", web::get().to(folders::list))
                    .route("/{id}", web::get().to(folders::get))
                    .route("/{id}", web::put().to(folders::update))
                    .route("/{id}", web::delete().to(folders::delete))
                    .route("/{id}/posts", web::get().to(folders::get_with_posts)),
            ),
    );
}
