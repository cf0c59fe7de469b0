//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use postline_shared::ApiResponse;
use postline_shared::dto::{
    CreatePostRequest, GenerateContentRequest, MovePostRequest, PostQuery, SchedulePostRequest,
    ScheduleWindowQuery, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .create_post(identity.user_id, req.into_new_post())
        .await?;

    Ok(HttpResponse::Created()
        .json(ApiResponse::ok_with_message(post, "Post created successfully")))
}

/// PUT /api/posts/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .update_post(identity.user_id, path.into_inner(), req.into_changes())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "Post updated successfully")))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_post(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message_only("Post deleted successfully")))
}

/// GET /api/posts/{id}
pub async fn get(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_post(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post,
        "Post retrieved successfully",
    )))
}

/// GET /api/posts
pub async fn list(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let filters = query.into_inner().into_filters();
    let posts = state.posts.get_posts(identity.user_id, &filters).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(posts, "Posts retrieved successfully")))
}

/// POST /api/posts/{id}/schedule
pub async fn schedule(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SchedulePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .schedule_post(identity.user_id, path.into_inner(), body.scheduled_at)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post,
        "Post scheduled successfully",
    )))
}

/// POST /api/posts/{id}/unschedule
pub async fn unschedule(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .unschedule_post(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post,
        "Post unscheduled successfully",
    )))
}

/// POST /api/posts/{id}/move
pub async fn move_to_folder(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<MovePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .move_post_to_folder(identity.user_id, path.into_inner(), body.folder_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "Post moved successfully")))
}

/// POST /api/posts/{id}/duplicate
pub async fn duplicate(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .duplicate_post(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post,
        "Post duplicated successfully",
    )))
}

/// POST /api/posts/generate-content
pub async fn generate_content(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<GenerateContentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    state
        .posts
        .generate_content(identity.user_id, req.into_brief())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::<()>::message_only(
        "Content generated successfully",
    )))
}

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let stats = state.posts.get_dashboard_stats(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        stats,
        "Dashboard stats retrieved successfully",
    )))
}

/// GET /api/schedule
pub async fn scheduled(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ScheduleWindowQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .get_scheduled_posts(identity.user_id, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        posts,
        "Scheduled posts retrieved successfully",
    )))
}
