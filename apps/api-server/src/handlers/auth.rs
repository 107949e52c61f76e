//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::services::{DetailChanges, Registration};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    LoginRequest, RegisterUserRequest, UpdateDetailsRequest, UpdatePasswordRequest,
};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: ValidatedJson<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .auth
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req
                .role
                .as_deref()
                .and_then(|role| role.parse().ok())
                .unwrap_or_default(),
        })
        .await?;

    tracing::info!(user_id = %session.user.id, "User registered");

    Ok(HttpResponse::Created().json(ApiResponse::with_token(
        present::user(&session.user),
        session.token,
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_token(
        present::user(&session.user),
        session.token,
    )))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::user(&identity.user))))
}

/// PUT /api/auth/updatedetails
pub async fn update_details(
    state: web::Data<AppState>,
    identity: Identity,
    body: ValidatedJson<UpdateDetailsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .auth
        .update_details(
            &identity.actor(),
            DetailChanges {
                username: req.username,
                email: req.email,
                profile: req.profile.map(present::profile_from),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::user(&user))))
}

/// PUT /api/auth/updatepassword
pub async fn update_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .auth
        .update_password(&identity.actor(), &req.current_password, &req.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_token(
        present::user(&session.user),
        session.token,
    )))
}
