//! JWT service for token generation and validation
//!
//! Tokens are signed with HS256 using a process-wide secret and carry the
//! user's id and email. They are never stored server-side: a token is valid
//! until its `exp` claim passes, and there is no revocation.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Default token lifetime in seconds (24 hours)
const DEFAULT_TOKEN_EXPIRY: u64 = 86400;

/// Longest accepted token lifetime in seconds (one year)
const MAX_TOKEN_EXPIRY: u64 = 365 * 86400;

/// Errors produced by the JWT service
#[derive(Error, Debug)]
pub enum JwtError {
    /// Missing, malformed, tampered or expired token. The cause is
    /// deliberately not distinguished.
    #[error("Invalid token")]
    InvalidToken,

    /// Token could not be signed
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// System clock is before the Unix epoch
    #[error("Failed to get current time")]
    Clock,

    /// Invalid configuration
    #[error("JWT configuration error: {0}")]
    Configuration(String),
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required, non-empty)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 86400, max: one year)
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            JwtError::Configuration("JWT_SECRET environment variable not set".to_string())
        })?;

        if secret.trim().is_empty() {
            return Err(JwtError::Configuration(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|expiry| *expiry > 0)
            .unwrap_or(DEFAULT_TOKEN_EXPIRY);

        if token_expiry > MAX_TOKEN_EXPIRY {
            return Err(JwtError::Configuration(format!(
                "JWT_TOKEN_EXPIRY must be at most {} seconds",
                MAX_TOKEN_EXPIRY
            )));
        }

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// User email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Generate a token for a user, issued now
    pub fn generate_token(&self, user_id: i64, email: &str) -> Result<String, JwtError> {
        self.generate_token_at(user_id, email, now()?)
    }

    /// Generate a token for a user as if issued at `issued_at` (Unix seconds)
    pub fn generate_token_at(
        &self,
        user_id: i64,
        email: &str,
        issued_at: u64,
    ) -> Result<String, JwtError> {
        let exp = issued_at.checked_add(self.token_expiry).ok_or_else(|| {
            JwtError::Configuration("token expiry overflows the exp claim".to_string())
        })?;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: issued_at,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Signing)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                JwtError::InvalidToken
            })?;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before expiry
        if token_data.claims.exp <= now()? {
            return Err(JwtError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    /// Get the token expiry time in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

fn now() -> Result<u64, JwtError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| JwtError::Clock)
}

#[cfg(test)]
pub(crate) fn test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret".to_string(),
        token_expiry: 3600,
    })
}
