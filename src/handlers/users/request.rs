//! User request DTOs

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    constants::MAX_PASSWORD_LENGTH,
    models::{CreditChange, Role},
};

/// Create or replace user request
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    pub role: Option<Role>,

    /// Negative values clamp to zero
    pub credits: Option<i64>,

    pub disabled: Option<bool>,
}

/// Credit update request: exactly one of `set` or `delta`
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_credit_change"))]
pub struct UpdateCreditsRequest {
    pub set: Option<i64>,
    pub delta: Option<i64>,
}

impl UpdateCreditsRequest {
    pub fn change(&self) -> Option<CreditChange> {
        match (self.set, self.delta) {
            (Some(n), None) => Some(CreditChange::Set(n)),
            (None, Some(d)) => Some(CreditChange::Delta(d)),
            _ => None,
        }
    }
}

fn validate_credit_change(request: &UpdateCreditsRequest) -> Result<(), ValidationError> {
    if request.change().is_none() {
        let mut error = ValidationError::new("credit_change");
        error.message = Some("Provide exactly one of 'set' or 'delta'".into());
        return Err(error);
    }
    Ok(())
}

/// Enable or disable an account
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Omitted means enabled
    #[serde(default)]
    pub disabled: bool,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Required unless an admin is resetting the password
    pub current_password: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_request_needs_one_operation() {
        let set: UpdateCreditsRequest = serde_json::from_str(r#"{"set": 4}"#).unwrap();
        assert_eq!(set.change(), Some(CreditChange::Set(4)));
        assert!(set.validate().is_ok());

        let both: UpdateCreditsRequest =
            serde_json::from_str(r#"{"set": 4, "delta": 1}"#).unwrap();
        assert!(both.validate().is_err());

        let neither: UpdateCreditsRequest = serde_json::from_str("{}").unwrap();
        assert!(neither.validate().is_err());
    }

    #[test]
    fn test_missing_password_rejected() {
        let request: UpsertUserRequest = serde_json::from_str(r#"{"role": "admin"}"#).unwrap();
        assert!(request.validate().is_err());
        assert_eq!(request.role, Some(Role::Admin));
    }
}
