use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::authentication::models::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates the session token and stores the caller's
/// identity in the request extensions as an [`AuthenticatedUser`].
///
/// Every failure produces the same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            unauthorized()
        })?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        unauthorized()
    })?;

    let caller = AuthenticatedUser::from(claims);
    tracing::debug!(user_id = %caller.user_id, "Request authenticated");
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization` value of the exact form
/// `bearer <token>`: two parts separated by a single space, lowercase scheme.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("unauthorized".to_string()).into_response()
}
