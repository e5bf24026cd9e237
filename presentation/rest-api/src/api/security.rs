use jsonwebtoken::{decode, decode_header};
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::Deserialize;

use business::domain::shared::value_objects::UserId;

use crate::config::auth_config::AuthConfig;

#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String,
}

/// Checks an access token against the configured secret and returns the
/// shopper it was issued to.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<UserId, String> {
    decode_header(token).map_err(|e| format!("auth.invalid_token_header: {e}"))?;

    let token_data = decode::<AccessClaims>(token, &config.decoding_key(), &config.validation())
        .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    UserId::parse(&token_data.claims.sub).ok_or_else(|| "auth.missing_subject".to_string())
}

/// Bearer access token issued by the identity provider
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "jwt_bearer_checker")]
pub struct JwtBearer(pub UserId);

impl JwtBearer {
    /// Row-level access: a shopper only reaches their own cart rows.
    pub fn authorize(&self, path_user_id: &str) -> Option<UserId> {
        (self.0.as_str() == path_user_id).then(|| self.0.clone())
    }
}

async fn jwt_bearer_checker(req: &Request, bearer: poem_openapi::auth::Bearer) -> Option<UserId> {
    let Some(config) = req.data::<AuthConfig>() else {
        tracing::error!("Auth configuration missing from request data");
        return None;
    };

    match verify_token(&bearer.token, config) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("Bearer auth failed: {e}");
            None
        }
    }
}
