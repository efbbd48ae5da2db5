use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{IssuedToken, TokenClaims, TokenIssuer};
use crate::infrastructure::config::AuthConfig;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  email: String,
  iss: String,
  aud: String,
  iat: i64,
  exp: i64,
}

/// HS256 bearer tokens with issuer and audience checks.
pub struct JwtTokenIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  issuer: String,
  audience: String,
  ttl_seconds: u64,
}

impl JwtTokenIssuer {
  pub fn new(config: &AuthConfig) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
      issuer: config.jwt_issuer.clone(),
      audience: config.jwt_audience.clone(),
      ttl_seconds: config.token_ttl_seconds,
    }
  }

  fn validation(&self) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&self.issuer]);
    validation.set_audience(&[&self.audience]);
    validation
  }
}

impl TokenIssuer for JwtTokenIssuer {
  fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
      sub: user_id.to_string(),
      email: email.to_string(),
      iss: self.issuer.clone(),
      aud: self.audience.clone(),
      iat: now,
      exp: now + self.ttl_seconds as i64,
    };

    let token = encode(&Header::default(), &claims, &self.encoding_key)
      .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

    Ok(IssuedToken {
      token,
      expires_in_seconds: self.ttl_seconds,
    })
  }

  fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
    let data = decode::<Claims>(token, &self.decoding_key, &self.validation())
      .map_err(|_| AuthError::InvalidToken)?;

    let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;

    Ok(TokenClaims {
      user_id,
      email: data.claims.email,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> AuthConfig {
    AuthConfig {
      jwt_secret: "test-secret-key-for-unit-tests".to_string(),
      jwt_issuer: "invoicery".to_string(),
      jwt_audience: "invoicery-clients".to_string(),
      token_ttl_seconds: 3600,
    }
  }

  #[test]
  fn test_issue_and_verify_round_trip() {
    let issuer = JwtTokenIssuer::new(&config());
    let user_id = Uuid::new_v4();

    let issued = issuer.issue(user_id, "jane@example.com").unwrap();
    assert_eq!(issued.expires_in_seconds, 3600);

    let claims = issuer.verify(&issued.token).unwrap();
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, "jane@example.com");
  }

  #[test]
  fn test_verify_rejects_garbage() {
    let issuer = JwtTokenIssuer::new(&config());
    assert!(matches!(
      issuer.verify("not-a-token"),
      Err(AuthError::InvalidToken)
    ));
  }

  #[test]
  fn test_verify_rejects_wrong_secret() {
    let issuer = JwtTokenIssuer::new(&config());
    let other = JwtTokenIssuer::new(&AuthConfig {
      jwt_secret: "completely-different-secret".to_string(),
      ..config()
    });

    let issued = other.issue(Uuid::new_v4(), "jane@example.com").unwrap();
    assert!(issuer.verify(&issued.token).is_err());
  }

  #[test]
  fn test_verify_rejects_wrong_audience() {
    let issuer = JwtTokenIssuer::new(&config());
    let other = JwtTokenIssuer::new(&AuthConfig {
      jwt_audience: "other-audience".to_string(),
      ..config()
    });

    let issued = other.issue(Uuid::new_v4(), "jane@example.com").unwrap();
    assert!(issuer.verify(&issued.token).is_err());
  }

  #[test]
  fn test_verify_rejects_expired_token() {
    let issuer = JwtTokenIssuer::new(&config());
    let now = Utc::now().timestamp();
    let claims = Claims {
      sub: Uuid::new_v4().to_string(),
      email: "jane@example.com".to_string(),
      iss: "invoicery".to_string(),
      aud: "invoicery-clients".to_string(),
      iat: now - 7200,
      exp: now - 3600,
    };
    let token = encode(&Header::default(), &claims, &issuer.encoding_key).unwrap();

    assert!(matches!(
      issuer.verify(&token),
      Err(AuthError::InvalidToken)
    ));
  }
}
