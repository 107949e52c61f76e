//! Health check endpoint.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::HealthResponse;

use crate::state::AppState;

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        environment: state.environment.clone(),
        database: state.store_kind().to_string(),
        timestamp: chrono::Utc::now(),
    };

    HttpResponse::Ok().json(ApiResponse::ok(response))
}
