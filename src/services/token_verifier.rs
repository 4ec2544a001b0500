//! Access token verification.
//!
//! Tokens are issued by the identity provider. This service only checks
//! the signature and expiry and hands back the subject.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// External identity id, validated later by the identity resolver
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and extract its claims
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 verifier keyed with the configured secret
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            validation: Validation::default(),
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}
