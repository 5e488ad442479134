//! Credential login.

use crate::context::AuthContext;
use crate::password::verify_password;
use plumeria_commons::{ApiError, ApiResult, UserName};
use plumeria_store::StorageBackend;
use plumeria_system::UsersProvider;

/// Authenticates a user by name and password.
///
/// The name lookup is case-insensitive; verification is exact. The read
/// transaction is released before the (slow) hash verification runs.
pub async fn login(
    backend: &dyn StorageBackend,
    name: &UserName,
    password: &str,
) -> ApiResult<AuthContext> {
    let tx = backend.begin().await?;
    let user = UsersProvider::find_by_name(tx.as_ref(), name)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", name)))?;
    drop(tx);

    if verify_password(password, &user.password_hash).await? {
        log::debug!("user {} logged in", user.name);
        Ok(AuthContext::for_user(user))
    } else {
        Err(ApiError::policy("Invalid password"))
    }
}
