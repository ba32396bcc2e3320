//! Bearer token verification for API requests.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

/// Claims this service cares about in an access token.
#[derive(Debug, Deserialize)]
struct Claims {
    email: String,
    #[allow(dead_code)]
    exp: usize,
}

/// The caller identity established by the auth middleware.
///
/// Inserted into request extensions after a successful verification; the
/// create handler uses it as the campaign's `created_by`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Verifies bearer tokens and extracts the caller's email claim.
///
/// Tokens are HS256-signed JWTs checked against the shared secret from
/// configuration. Expiry is enforced; every other identity-provider concern
/// stays outside this service.
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifies a token and returns the authenticated caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token is malformed,
    /// expired, or signed with a different secret.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            AppError::unauthorized("invalid token", json!({}))
        })?;

        Ok(AuthenticatedUser {
            email: data.claims.email,
        })
    }
}
