//! User model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    constants::{MAX_FAILED_ATTEMPTS, roles},
    models::CreditChange,
};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => roles::USER,
            Role::Admin => roles::ADMIN,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            roles::ADMIN => Ok(Role::Admin),
            roles::USER => Ok(Role::User),
            other => Err(format!(
                "Invalid role: {}. Valid roles: {:?}",
                other,
                roles::ALL
            )),
        }
    }
}

/// Stored user record, keyed by username in the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub password_hash: String,
    /// Plaintext password found in documents written before hashing; never written back
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "non_negative_credits")]
    pub credits: u32,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub failed_attempts: u32,
}

/// Result of recording a failed login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedLogin {
    pub remaining: u32,
    pub locked: bool,
}

impl User {
    /// Create an enabled account with no credits
    pub fn new(password_hash: String, role: Role) -> Self {
        Self {
            password_hash,
            role,
            ..Self::default()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Count a failed login; admins are disabled once the threshold is reached
    pub fn record_failed_login(&mut self) -> FailedLogin {
        self.failed_attempts = self.failed_attempts.saturating_add(1);

        let locked = self.is_admin() && self.failed_attempts >= MAX_FAILED_ATTEMPTS;
        if locked {
            self.disabled = true;
        }

        FailedLogin {
            remaining: MAX_FAILED_ATTEMPTS.saturating_sub(self.failed_attempts),
            locked,
        }
    }

    pub fn reset_failed_logins(&mut self) {
        self.failed_attempts = 0;
    }

    /// Enable or disable the account; enabling clears the failure counter
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if !disabled {
            self.failed_attempts = 0;
        }
    }

    pub fn apply_credits(&mut self, change: CreditChange) -> u32 {
        self.credits = change.apply(self.credits);
        self.credits
    }
}

fn non_negative_credits<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(u32::MAX)) as u32)
}
