use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
