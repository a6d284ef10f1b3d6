//! Signed session tokens (HS256 JWT)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: &UserId, lifetime: Duration) -> Result<Self, DomainError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| DomainError::internal("Session expiry is out of range"))?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn user_id(&self) -> Result<UserId, DomainError> {
        self.sub
            .parse()
            .map_err(|_| DomainError::authentication("Session token has an invalid subject"))
    }
}

/// Issues and checks tamper-evident session tokens
pub trait SessionTokenService: Send + Sync + Debug {
    /// Issue a token identifying the given user
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError>;

    /// Validate signature and expiry, returning the claims
    fn validate(&self, token: &str) -> Result<SessionClaims, DomainError>;

    /// Token lifetime in hours
    fn expiration_hours(&self) -> u64;
}

/// Session tokens signed with a shared secret
#[derive(Clone)]
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
    expiration_hours: u64,
}

impl Debug for JwtSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("keys", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtSessionService {
    /// Fails when the lifetime is zero or does not fit a timestamp.
    pub fn new(secret: &str, expiration_hours: u64) -> Result<Self, DomainError> {
        let lifetime = session_lifetime(expiration_hours)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
            expiration_hours,
        })
    }
}

/// Convert the configured session lifetime, rejecting unusable values
fn session_lifetime(expiration_hours: u64) -> Result<Duration, DomainError> {
    let out_of_range = || {
        DomainError::configuration(format!(
            "session.expiration_hours must be positive and within the supported date range, got {}",
            expiration_hours
        ))
    };

    if expiration_hours == 0 {
        return Err(out_of_range());
    }

    let lifetime = i64::try_from(expiration_hours)
        .ok()
        .and_then(Duration::try_hours)
        .ok_or_else(out_of_range)?;

    Utc::now()
        .checked_add_signed(lifetime)
        .map(|_| lifetime)
        .ok_or_else(out_of_range)
}

impl SessionTokenService for JwtSessionService {
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError> {
        let claims = SessionClaims::new(user_id, self.lifetime)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to issue session token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, DomainError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::authentication(format!("Invalid session token: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> JwtSessionService {
        JwtSessionService::new("test-secret-key-12345", 24).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_service();

        let token = service.issue(&UserId::new(7)).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id().unwrap(), UserId::new(7));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token() {
        let service = create_service();

        let result = service.validate("not-a-token");
        assert!(matches!(result, Err(DomainError::Authentication { .. })));
    }

    #[test]
    fn test_tampered_token() {
        let service = create_service();
        let token = service.issue(&UserId::new(7)).unwrap();

        // Flip the first character of the signature segment
        let signature_start = token.rfind('.').unwrap() + 1;
        let original = token.as_bytes()[signature_start];
        let replacement = if original == b'A' { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(signature_start..signature_start + 1, replacement);

        assert!(service.validate(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtSessionService::new("secret-1", 24).unwrap();
        let verifier = JwtSessionService::new("secret-2", 24).unwrap();

        let token = issuer.issue(&UserId::new(1)).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();

        let past = Utc::now() - Duration::hours(1);
        let claims = SessionClaims {
            sub: "1".to_string(),
            iat: (past - Duration::hours(2)).timestamp(),
            exp: past.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_lifetime_out_of_range() {
        for hours in [0, u64::MAX, u64::MAX / 2, i64::MAX as u64, 1 << 40] {
            let result = JwtSessionService::new("s", hours);
            assert!(
                matches!(result, Err(DomainError::Configuration { .. })),
                "expected configuration error for {} hours",
                hours
            );
        }
    }

    #[test]
    fn test_long_lifetime_still_validates() {
        // Roughly ten years
        let service = JwtSessionService::new("s", 24 * 365 * 10).unwrap();

        let token = service.issue(&UserId::new(3)).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), UserId::new(3));
        assert_eq!(service.expiration_hours(), 24 * 365 * 10);
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", create_service());
        assert!(debug.contains("[hidden]"));
        assert!(!debug.contains("test-secret"));
    }
}
