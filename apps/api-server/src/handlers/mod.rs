//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod posts;
mod present;
mod tags;


use actix_web::{HttpRequest, HttpResponse, Resource, web};

use quill_shared::{ApiResponse, Empty};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                // Public routes
                .service(resource("/health").route(web::get().to(health::health_check)))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .service(resource("/register").route(web::post().to(auth::register)))
                        .service(resource("/login").route(web::post().to(auth::login)))
                        .service(resource("/me").route(web::get().to(auth::me)))
                        .service(
                            resource("/updatedetails")
                                .route(web::put().to(auth::update_details)),
                        )
                        .service(
                            resource("/updatepassword")
                                .route(web::put().to(auth::update_password)),
                        ),
                )
                // Post routes; fixed segments before `{id}`
                .service(
                    web::scope("/posts")
                        .service(
                            resource("")
                                .route(web::get().to(posts::list))
                                .route(web::post().to(posts::create)),
                        )
                        .service(
                            resource("/category/{id}").route(web::get().to(posts::by_category)),
                        )
                        .service(resource("/{id}/like").route(web::post().to(posts::toggle_like)))
                        .service(
                            resource("/{id}")
                                .route(web::get().to(posts::get))
                                .route(web::put().to(posts::update))
                                .route(web::delete().to(posts::delete)),
                        ),
                )
                // Category routes
                .service(
                    web::scope("/categories")
                        .service(
                            resource("")
                                .route(web::get().to(categories::list))
                                .route(web::post().to(categories::create)),
                        )
                        .service(
                            resource("/{id}")
                                .route(web::get().to(categories::get))
                                .route(web::put().to(categories::update))
                                .route(web::delete().to(categories::delete)),
                        ),
                )
                // Tag routes
                .service(
                    web::scope("/tags")
                        .service(
                            resource("")
                                .route(web::get().to(tags::list))
                                .route(web::post().to(tags::create)),
                        )
                        .service(
                            resource("/{id}")
                                .route(web::get().to(tags::get))
                                .route(web::put().to(tags::update))
                                .route(web::delete().to(tags::delete)),
                        ),
                ),
        );
}

/// A resource whose unmatched methods answer like an unknown route.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(not_found))
}

/// Fallback for every unknown route.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<Empty>::error(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {err}")).into()
    })
}

/// Path ids that do not parse cannot name a stored resource.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Resource not found".to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {err}")).into()
    })
}
