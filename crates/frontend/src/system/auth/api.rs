use contracts::system::auth::{LoginRequest, UserInfo};

use crate::shared::api::{self, ApiError};

/// Login with username and password; the backend sets the session cookies
pub async fn login(request: &LoginRequest) -> Result<UserInfo, ApiError> {
    api::post_json("/auth/login", request).await
}

/// Current user of the cookie session
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    api::get_json("/auth/me").await
}

/// Logout (the backend clears the cookies)
pub async fn logout() -> Result<(), ApiError> {
    api::post_empty("/auth/logout").await
}
