// src/services/auth.rs
use anyhow::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims the identity provider puts in its access tokens. The backend never
/// issues sessions itself; it only reads the subscription flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub premium: bool,
    pub exp: i64,
}

/// Decode and verify a bearer token with the shared HS256 secret.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Sign a token the way the identity provider does. Used by the smoke
/// binaries and tests; production tokens come from the provider.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn claims(premium: bool) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            premium,
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        }
    }

    #[test]
    fn roundtrip_preserves_premium_flag() {
        let token = issue_token(&claims(true), "secret").unwrap();
        let decoded = decode_claims(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "user-1");
        assert!(decoded.premium);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&claims(true), "secret").unwrap();
        assert!(decode_claims(&token, "other-secret").is_err());
    }

    #[test]
    fn missing_premium_claim_defaults_to_false() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "user-2", "exp": exp }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        let decoded = decode_claims(&token, "secret").unwrap();
        assert!(!decoded.premium);
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = Claims {
            sub: "user-3".to_string(),
            premium: true,
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = issue_token(&expired, "secret").unwrap();
        assert!(decode_claims(&token, "secret").is_err());
    }
}
