use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Change the password of the calling user.
///
/// The caller must own the target record. Ownership is checked before the
/// body is looked at, so a request against someone else's record is refused
/// whatever it carries.
pub async fn update_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<UpdatePasswordResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    caller.authorize_owner(&user_id).map_err(|e| {
        tracing::warn!(
            caller_id = %caller.user_id,
            user_id = %user_id,
            "Password change refused"
        );
        ApiError::from(e)
    })?;

    let Json(body) = body?;
    let command = UpdatePasswordCommand {
        password: Password::new(body.password)?,
    };

    state
        .user_service
        .update_password(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePasswordRequest {
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePasswordResponseData {
    pub id: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UpdatePasswordResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            updated_at: user.updated_at,
        }
    }
}
