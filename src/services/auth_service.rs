//! Authentication service - credential verification and token handling.
//!
//! Verifies login/password pairs against the account store, mints signed
//! bearer tokens, and validates tokens presented on later requests. Token
//! operations are pure CPU work; only the credential check touches the store.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TTL_HOURS, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload.
///
/// The admin flag is a typed boolean internally and travels on the wire as
/// the string "true"/"false".
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Login of the authenticated account
    pub login: String,
    /// Admin role flag
    #[serde(with = "bool_string")]
    pub is_admin: bool,
    /// Unique token identifier, fresh per issuance
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Wire encoding of the admin claim as "true"/"false"
mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s == "true")
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and return a signed token
    async fn login(&self, login: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Mint a signed token for a user (shared helper)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(TOKEN_TTL_HOURS);

    let claims = Claims {
        login: user.login.clone(),
        is_admin: user.is_admin,
        jti: Uuid::new_v4().to_string(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: TOKEN_TTL_HOURS * SECONDS_PER_HOUR,
    })
}

/// Verify signature, issuer, audience, and expiry (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_audience(&[&config.jwt_audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService backed by the account store.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, login: String, password: String) -> AppResult<TokenResponse> {
        // Revoked accounts can still authenticate; only mutations against
        // them are blocked later.
        let user_result = self.repo.find_by_login(login).await?;

        // Unknown logins still pay for a hash verification; both failure
        // paths must cost the same.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let password_hash = match &user_result {
            Some(user) => user.password_hash.as_str(),
            None => dummy_hash,
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Missing login and wrong password are indistinguishable to the caller
        match user_result {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, NewUser};

    fn test_config() -> Config {
        Config::for_tests("test-secret-key-for-testing-only-32chars")
    }

    fn test_user(is_admin: bool) -> User {
        User::new(
            NewUser {
                login: "carol".to_string(),
                password: "ignored".to_string(),
                name: "Carol Jones".to_string(),
                gender: Gender::Female,
                birthday: None,
                is_admin,
            },
            "hashed".to_string(),
            "admin",
        )
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let config = test_config();
        let user = test_user(true);

        let token = generate_token(&user, &config).unwrap();
        let claims = verify_token_internal(&token.access_token, &config).unwrap();

        assert_eq!(claims.login, "carol");
        assert!(claims.is_admin);
        assert!(!claims.jti.is_empty());
        assert_eq!(token.expires_in, SECONDS_PER_HOUR);
    }

    #[test]
    fn each_token_gets_a_fresh_jti() {
        let config = test_config();
        let user = test_user(false);

        let t1 = generate_token(&user, &config).unwrap();
        let t2 = generate_token(&user, &config).unwrap();
        let c1 = verify_token_internal(&t1.access_token, &config).unwrap();
        let c2 = verify_token_internal(&t2.access_token, &config).unwrap();

        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn admin_flag_travels_as_string() {
        let claims = Claims {
            login: "carol".to_string(),
            is_admin: true,
            jti: "x".to_string(),
            iss: "i".to_string(),
            aud: "a".to_string(),
            iat: 0,
            exp: 0,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["is_admin"], "true");

        let parsed: Claims = serde_json::from_value(json).unwrap();
        assert!(parsed.is_admin);
    }

    #[test]
    fn expired_token_fails_validation() {
        let config = test_config();
        let now = Utc::now();
        // Expired well past the default leeway
        let claims = Claims {
            login: "carol".to_string(),
            is_admin: false,
            jti: Uuid::new_v4().to_string(),
            iss: config.jwt_issuer.clone(),
            aud: config.jwt_audience.clone(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret_bytes()),
        )
        .unwrap();

        assert!(verify_token_internal(&token, &config).is_err());
    }

    #[test]
    fn wrong_issuer_or_audience_fails_validation() {
        let config = test_config();
        let user = test_user(false);
        let token = generate_token(&user, &config).unwrap();

        let mut other = Config::for_tests("test-secret-key-for-testing-only-32chars");
        other.jwt_issuer = "someone-else".to_string();
        assert!(verify_token_internal(&token.access_token, &other).is_err());

        let mut other = Config::for_tests("test-secret-key-for-testing-only-32chars");
        other.jwt_audience = "other-clients".to_string();
        assert!(verify_token_internal(&token.access_token, &other).is_err());
    }

    #[test]
    fn wrong_key_fails_validation() {
        let config = test_config();
        let user = test_user(false);
        let token = generate_token(&user, &config).unwrap();

        let other = Config::for_tests("another-secret-key-also-32-chars!!!!");
        assert!(verify_token_internal(&token.access_token, &other).is_err());
    }
}
