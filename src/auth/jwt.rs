use crate::models::Claims;
use jsonwebtoken::{DecodingKey, Validation, decode};

/// Verify a backend-issued access token with the shared project
/// secret. The backend mints tokens with `aud = authenticated`;
/// anything else (anon tokens, service keys) is refused here.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::default();
    validation.set_audience(&["authenticated"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "super-secret-signing-key";

    fn claims(aud: &str, exp_offset_secs: i64) -> Claims {
        Claims {
            sub: "5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34".to_string(),
            email: Some("budi@example.com".to_string()),
            role: Some("authenticated".to_string()),
            aud: aud.to_string(),
            exp: (Utc::now().timestamp() + exp_offset_secs) as usize,
        }
    }

    fn token(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verifies_a_freshly_signed_token() {
        let verified = verify_token(&token(&claims("authenticated", 3600)), SECRET).unwrap();
        assert_eq!(verified.sub, "5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34");
        assert_eq!(verified.email.as_deref(), Some("budi@example.com"));
    }

    #[test]
    fn rejects_a_wrong_secret() {
        assert!(verify_token(&token(&claims("authenticated", 3600)), "other").is_err());
    }

    #[test]
    fn rejects_an_expired_token() {
        assert!(verify_token(&token(&claims("authenticated", -3600)), SECRET).is_err());
    }

    #[test]
    fn rejects_a_foreign_audience() {
        assert!(verify_token(&token(&claims("anon", 3600)), SECRET).is_err());
    }
}
