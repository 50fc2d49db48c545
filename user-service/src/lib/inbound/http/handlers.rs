use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::authentication::errors::AccessError;
use crate::domain::authentication::errors::AuthError;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

pub mod create_user;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod update_password;

/// Body of every 500 response. The underlying cause is only logged.
const INTERNAL_SERVER_ERROR: &str = "internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    fn internal(cause: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        ApiError::InternalServerError(INTERNAL_SERVER_ERROR.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_) | UserError::Validation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Hashing(_) | UserError::DatabaseError(_) => ApiError::internal(&err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<UserIdError> for ApiError {
    fn from(err: UserIdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WrongCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Internal => ApiError::InternalServerError(err.to_string()),
            AuthError::Repository(e) => e.into(),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_hide_details() {
        let errors = [
            UserError::DatabaseError("relation \"users\" does not exist".to_string()),
            UserError::Hashing("params".to_string()),
        ];

        for err in errors {
            assert_eq!(
                ApiError::from(err),
                ApiError::InternalServerError("internal server error".to_string())
            );
        }
    }

    #[test]
    fn test_user_error_status_mapping() {
        assert!(matches!(
            ApiError::from(UserError::NotFound("5".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.io".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(UserError::Validation(ValidationError::TooShort)),
            ApiError::BadRequest("password must be at least 6 characters long".to_string())
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            ApiError::from(AuthError::WrongCredentials),
            ApiError::Unauthorized("wrong credentials".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::Internal),
            ApiError::InternalServerError("internal server error".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::Repository(UserError::DatabaseError(
                "timeout".to_string()
            ))),
            ApiError::InternalServerError("internal server error".to_string())
        );
        assert_eq!(
            ApiError::from(AccessError::Forbidden),
            ApiError::Forbidden("forbidden".to_string())
        );
    }

    #[test]
    fn test_user_data_has_no_password_field() {
        let now = Utc::now();
        let data = UserData {
            id: 1,
            name: "User1".to_string(),
            email: "user1@example.com".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&data).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
    }
}
