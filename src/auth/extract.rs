use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::app_state::AppState;
use crate::auth::token::verify_token;
use crate::db::models::{Role, User};
use crate::db::repositories::UserRepository;
use crate::error::AppError;

/// Authenticated caller, resolved from the bearer token on every protected
/// request. A token whose subject no longer exists is treated the same as a
/// bad token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    /// Role gate: authenticated but wrong role is Forbidden, not Unauthorized.
    pub fn require(&self, allowed: &[Role]) -> Result<&User, AppError> {
        if allowed.contains(&self.user.role) {
            Ok(&self.user)
        } else {
            Err(AppError::Authorization(
                "Insufficient role for this operation".to_string(),
            ))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Authentication("Missing bearer token".to_string()))?;

        let user_id = verify_token(&state.config.auth, token)?;

        let user = UserRepository::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Unknown token subject".to_string()))?;

        Ok(CurrentUser { user })
    }
}
