//! Authentication service

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::Config,
    db::{Store, repositories::UserRepository},
    error::{AppError, AppResult},
    models::{Role, User},
    utils::verify_password,
};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub role: Role,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub username: String,
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

/// Token ids invalidated by logout, kept until their natural expiry
#[derive(Debug, Default)]
pub struct RevokedTokens {
    entries: Mutex<HashMap<Uuid, i64>>,
}

impl RevokedTokens {
    pub fn revoke(&self, jti: Uuid, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, exp| *exp > now);
        entries.insert(jti, expires_at);
    }

    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(jti)
    }
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Login with username and password.
    ///
    /// Disabled accounts are rejected before the password is checked. A
    /// wrong password is counted against the account and persisted even
    /// though the call fails.
    pub async fn login(
        store: &Store,
        config: &Config,
        username: &str,
        password: &str,
    ) -> AppResult<LoginSuccess> {
        let user = store
            .read(|db| UserRepository::get(db, username).cloned())
            .await?;

        if user.disabled {
            return Err(AppError::UserDisabled);
        }

        if !verify_password(password, &user.password_hash)? {
            let failure = store
                .transaction(|db| Ok(UserRepository::get_mut(db, username)?.record_failed_login()))
                .await?;

            if failure.locked {
                tracing::warn!(username, "Admin account disabled after repeated failed logins");
            } else {
                tracing::info!(username, remaining = failure.remaining, "Failed login");
            }
            return Err(AppError::WrongPassword {
                remaining: failure.remaining,
            });
        }

        let user = store
            .transaction(|db| {
                let user = UserRepository::get_mut(db, username)?;
                if user.disabled {
                    return Err(AppError::UserDisabled);
                }
                user.reset_failed_logins();
                Ok(user.clone())
            })
            .await?;

        let (access_token, expires_in) = Self::generate_access_token(username, user.role, config)?;
        tracing::info!(username, role = %user.role, "User logged in");

        Ok(LoginSuccess {
            username: username.to_string(),
            user,
            access_token,
            expires_in,
        })
    }

    /// Logout (invalidate the presented token)
    pub fn logout(revoked: &RevokedTokens, jti: Uuid, expires_at: i64) {
        revoked.revoke(jti, expires_at);
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Generate access token
    pub fn generate_access_token(
        username: &str,
        role: Role,
        config: &Config,
    ) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: username.to_string(),
            role,
            jti: Uuid::new_v4(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}
