use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::update_password::update_password;
use super::middleware::authenticate;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    authenticator: Arc<Authenticator>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        user_service,
        auth_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/users", post(create_user).get(list_users))
        .route("/users/:user_id", get(get_user));

    let protected_routes = Router::new()
        .route("/users/:user_id/password", post(update_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers stay out of the span: they carry bearer tokens.
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
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
        .with_state(state)
}
