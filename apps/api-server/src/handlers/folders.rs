//! Folder handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use postline_shared::ApiResponse;
use postline_shared::dto::{CreateFolderRequest, DeleteFolderQuery, UpdateFolderRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/folders
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateFolderRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let folder = state
        .folders
        .create_folder(identity.user_id, req.name, req.description, req.color)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        folder,
        "Folder created successfully",
    )))
}

/// PUT /api/folders/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFolderRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let folder = state
        .folders
        .update_folder(identity.user_id, path.into_inner(), req.into_changes())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        folder,
        "Folder updated successfully",
    )))
}

/// GET /api/folders
pub async fn list(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let folders = state.folders.get_folders(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        folders,
        "Folders retrieved successfully",
    )))
}

/// GET /api/folders/{id}
pub async fn get(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let folder = state
        .folders
        .get_folder(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        folder,
        "Folder retrieved successfully",
    )))
}

/// GET /api/folders/{id}/posts
pub async fn get_with_posts(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let aggregate = state
        .folders
        .get_folder_with_posts(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        aggregate,
        "Folder retrieved successfully",
    )))
}

/// DELETE /api/folders/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<DeleteFolderQuery>,
) -> AppResult<HttpResponse> {
    state
        .folders
        .delete_folder(
            identity.user_id,
            path.into_inner(),
            query.move_to_folder_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message_only(
        "Folder deleted successfully",
    )))
}
