//! Tag handlers. Writes are admin-only; the service enforces the role.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::TagFields;
use quill_shared::dto::TagRequest;
use quill_shared::{ApiResponse, Empty};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

fn fields(req: TagRequest) -> TagFields {
    TagFields {
        name: req.name,
        description: req.description,
    }
}

/// GET /api/tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        tags.into_iter().map(present::tag).collect(),
    )))
}

/// GET /api/tags/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let tag = state.tags.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::tag(tag))))
}

/// POST /api/tags
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: ValidatedJson<TagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state
        .tags
        .create(&identity.actor(), fields(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(present::tag(tag))))
}

/// PUT /api/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: ValidatedJson<TagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state
        .tags
        .update(id.into_inner(), &identity.actor(), fields(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::tag(tag))))
}

/// DELETE /api/tags/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .tags
        .delete(id.into_inner(), &identity.actor())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}
