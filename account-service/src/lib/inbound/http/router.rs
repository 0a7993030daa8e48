use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_user::delete_user;
use super::handlers::forget::forget;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::reset::reset;
use super::handlers::update_user::update_user;
use super::handlers::update_user::update_user_partial;
use super::handlers::upload::upload_files;
use super::handlers::upload::upload_files_fields;
use super::handlers::upload::upload_photo;
use crate::auth::guard::AuthGuard;
use crate::auth::ports::AuthServicePort;
use crate::file::ports::FileServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub file_service: Arc<dyn FileServicePort>,
    pub guard: Arc<AuthGuard>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    file_service: Arc<dyn FileServicePort>,
) -> Router {
    let guard = Arc::new(AuthGuard::new(auth_service.clone(), user_service.clone()));
    let state = AppState {
        user_service,
        auth_service,
        file_service,
        guard,
    };

    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/forget", post(forget))
        .route("/auth/reset", post(reset))
        .route("/auth/me", post(me))
        .route("/auth/photo", post(upload_photo))
        .route("/auth/files", post(upload_files))
        .route("/auth/files-fields", post(upload_files_fields));

    // Guarded per handler through the `RequestIdentity` extractor
    let user_routes = Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:user_id",
            get(get_user)
                .put(update_user)
                .patch(update_user_partial)
                .delete(delete_user),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(user_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
