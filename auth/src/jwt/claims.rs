use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Identity claims carried by a session token.
///
/// The user fields are a snapshot taken at login; they are not refreshed if
/// the user record changes while the token is alive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the authenticated user
    pub user_id: u64,

    /// Display name at login time
    pub name: String,

    /// Email address at login time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `name` - User display name
    /// * `email` - User email address
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with `exp = iat + expiration_hours * 3600`
    pub fn for_user(
        user_id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        expiration_hours: u32,
    ) -> Self {
        Self::issued_at(Utc::now().timestamp(), user_id, name, email, expiration_hours)
    }

    /// Create claims for a user with an explicit issue time.
    pub fn issued_at(
        iat: i64,
        user_id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        expiration_hours: u32,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            iat,
            exp: iat + i64::from(expiration_hours) * SECONDS_PER_HOUR,
        }
    }

    /// Check if token is expired.
    ///
    /// The expiration instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if token was issued after the given instant.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat
    }
}
