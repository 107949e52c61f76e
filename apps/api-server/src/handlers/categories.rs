//! Category handlers. Writes are admin-only; the service enforces the role.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::CategoryFields;
use quill_shared::dto::CategoryRequest;
use quill_shared::{ApiResponse, Empty};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

fn fields(req: CategoryRequest) -> CategoryFields {
    CategoryFields {
        name: req.name,
        description: req.description,
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        categories.into_iter().map(present::category).collect(),
    )))
}

/// GET /api/categories/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let category = state.categories.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::category(category))))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: ValidatedJson<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .create(&identity.actor(), fields(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(present::category(category))))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: ValidatedJson<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .update(id.into_inner(), &identity.actor(), fields(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::category(category))))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .categories
        .delete(id.into_inner(), &identity.actor())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}
