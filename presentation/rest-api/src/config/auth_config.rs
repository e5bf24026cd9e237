use std::env;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

#[derive(Debug, thiserror::Error)]
pub enum AuthConfigError {
    #[error("auth.missing_secret: AUTH_JWT_SECRET must be set")]
    MissingSecret,
}

/// Verification settings for the identity provider's access tokens
/// (HS256, shared secret).
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, audience: Option<String>) -> Self {
        Self {
            secret: secret.into(),
            audience,
        }
    }

    /// Environment variables:
    /// - AUTH_JWT_SECRET: HMAC secret used to sign access tokens (required)
    /// - AUTH_JWT_AUDIENCE: expected `aud` claim (optional, e.g. "authenticated")
    pub fn from_env() -> Result<Self, AuthConfigError> {
        let secret = env::var("AUTH_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(AuthConfigError::MissingSecret)?;
        let audience = env::var("AUTH_JWT_AUDIENCE").ok().filter(|s| !s.is_empty());
        Ok(Self::new(secret, audience))
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }

    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("audience", &self.audience)
            .finish()
    }
}
