use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::Session;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .login(Credentials::new(body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

/// The user's public fields with the session token alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}
