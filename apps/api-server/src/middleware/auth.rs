//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::{Actor, User};

use super::error::AppError;
use crate::state::AppState;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Authenticated user identity extractor.
///
/// Resolves the bearer token to the stored account, so a token whose user has since
/// disappeared is rejected with 401:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn actor(&self) -> Actor {
        self.user.actor()
    }
}

/// Pull `<token>` out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                return Err(AppError::Internal("AppState not found in app data".to_string()));
            };
            let Some(token) = token else {
                return Err(AppError::Unauthorized(NOT_AUTHORIZED.to_string()));
            };

            let user = state.auth.current_user(&token).await?;
            Ok(Identity { user })
        })
    }
}
