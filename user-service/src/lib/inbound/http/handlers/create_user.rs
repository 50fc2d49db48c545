use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
}

impl CreateUserRequest {
    /// Validates name, email and password, in that order.
    fn try_into_command(self) -> Result<CreateUserCommand, ValidationError> {
        let name = UserName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(name, email, password))
    }
}
