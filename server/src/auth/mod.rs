//! Actor identity
//!
//! Session/cookie and token plumbing live outside this service; requests
//! arrive with an `x-user-id` header set by the edge. The extractor resolves
//! it against the account table so handlers always see a live [`CurrentUser`]
//! with its role. Passwords are argon2-hashed at registration.

mod extractor;
mod password;

pub use extractor::CurrentUser;
pub use password::hash_password;

use shared::models::UserRole;

impl CurrentUser {
    /// Fail with the given message unless the actor has `role`.
    pub fn require_role(&self, role: UserRole, action: &str) -> Result<(), crate::utils::AppError> {
        if self.user.role != role {
            return Err(crate::utils::AppError::forbidden(format!(
                "{action} requires a {role} account"
            )));
        }
        Ok(())
    }
}
