use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::AuthConfig;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Issue a bearer token whose subject is the user's id.
pub fn issue_token(auth: &AuthConfig, user_id: i64) -> Result<String, AppError> {
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(auth.token_ttl_minutes);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at.unix_timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.token_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token signing failed: {}", e)))
}

/// Decode and validate a bearer token, returning the subject user id.
/// Expired, malformed or mis-signed tokens all collapse to Unauthorized.
pub fn verify_token(auth: &AuthConfig, token: &str) -> Result<i64, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.token_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;

    data.claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Authentication("Invalid token subject".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> AuthConfig {
        AuthConfig {
            token_secret: "unit-test-secret".to_string(),
            token_ttl_minutes: 60,
        }
    }

    #[test]
    fn roundtrip() {
        let auth = test_auth();
        let token = issue_token(&auth, 42).unwrap();
        assert_eq!(verify_token(&auth, &token).unwrap(), 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthConfig {
            token_secret: "unit-test-secret".to_string(),
            // Far enough in the past to clear the default validation leeway.
            token_ttl_minutes: -5,
        };
        let token = issue_token(&auth, 7).unwrap();
        assert!(verify_token(&auth, &token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&test_auth(), 7).unwrap();
        let other = AuthConfig {
            token_secret: "different-secret".to_string(),
            token_ttl_minutes: 60,
        };
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token(&test_auth(), "not.a.token").is_err());
    }
}
