//! User service

use chrono::NaiveDate;

use crate::{
    db::{
        Store,
        repositories::{ReservationRepository, UserRepository},
    },
    error::{AppError, AppResult},
    models::{CreditChange, Role, User},
    utils::{hash_password, validate_username, verify_password},
};

/// Fields accepted when creating or replacing a user
#[derive(Debug, Clone, Default)]
pub struct UserUpsert {
    pub password: String,
    pub role: Option<Role>,
    pub credits: Option<i64>,
    pub disabled: Option<bool>,
}

/// Reservation counts for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationCounts {
    pub total: usize,
    pub upcoming: usize,
}

/// User service for business logic
pub struct UserService;

impl UserService {
    /// List all users ordered by username
    pub async fn list_users(store: &Store) -> Vec<(String, User)> {
        store
            .read(|db| {
                UserRepository::list(db)
                    .map(|(name, user)| (name.clone(), user.clone()))
                    .collect()
            })
            .await
    }

    /// Get user by username
    pub async fn get_user(store: &Store, username: &str) -> AppResult<User> {
        store
            .read(|db| UserRepository::get(db, username).cloned())
            .await
    }

    /// Create a user or replace an existing one. Omitted attributes keep
    /// their current values (or defaults for a new user); the failed-login
    /// counter is preserved.
    pub async fn upsert_user(store: &Store, username: &str, input: UserUpsert) -> AppResult<User> {
        validate_username(username).map_err(|e| AppError::Validation(e.to_string()))?;
        if input.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let user = store
            .transaction(|db| {
                let existing = UserRepository::find(db, username).cloned().unwrap_or_default();

                let mut user = User {
                    password_hash,
                    password: None,
                    role: input.role.unwrap_or(existing.role),
                    credits: existing.credits,
                    disabled: input.disabled.unwrap_or(existing.disabled),
                    failed_attempts: existing.failed_attempts,
                };
                if let Some(credits) = input.credits {
                    user.apply_credits(CreditChange::Set(credits));
                }

                UserRepository::upsert(db, username, user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(username, role = %user.role, "User saved");
        Ok(user)
    }

    /// Current credit balance
    pub async fn get_credits(store: &Store, username: &str) -> AppResult<u32> {
        store
            .read(|db| UserRepository::get(db, username).map(|u| u.credits))
            .await
    }

    /// Apply a credit change, returning the new balance
    pub async fn update_credits(
        store: &Store,
        username: &str,
        change: CreditChange,
    ) -> AppResult<u32> {
        let (before, after) = store
            .transaction(|db| {
                let user = UserRepository::get_mut(db, username)?;
                let before = user.credits;
                Ok((before, user.apply_credits(change)))
            })
            .await?;

        tracing::info!(username, ?change, before, after, "Credits updated");
        Ok(after)
    }

    /// Enable or disable an account
    pub async fn set_status(store: &Store, username: &str, disabled: bool) -> AppResult<bool> {
        store
            .transaction(|db| {
                let user = UserRepository::get_mut(db, username)?;
                user.set_disabled(disabled);
                Ok(())
            })
            .await?;

        tracing::info!(username, disabled, "Account status changed");
        Ok(disabled)
    }

    /// Change a password. Admins may set any password directly; users
    /// changing their own must prove the current one.
    pub async fn change_password(
        store: &Store,
        actor_is_admin: bool,
        username: &str,
        current_password: Option<&str>,
        new_password: &str,
    ) -> AppResult<()> {
        if new_password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let user = Self::get_user(store, username).await?;

        if !actor_is_admin {
            let current = current_password
                .ok_or_else(|| AppError::Validation("Current password required".to_string()))?;

            if !verify_password(current, &user.password_hash)? {
                return Err(AppError::Forbidden("Current password is incorrect".to_string()));
            }
        }

        let password_hash = hash_password(new_password)?;
        store
            .transaction(|db| {
                UserRepository::get_mut(db, username)?.password_hash = password_hash;
                Ok(())
            })
            .await?;

        tracing::info!(username, by_admin = actor_is_admin, "Password changed");
        Ok(())
    }

    /// Count the active reservations of a user
    pub async fn count_reservations(
        store: &Store,
        username: &str,
        today: NaiveDate,
    ) -> AppResult<ReservationCounts> {
        store
            .read(|db| {
                UserRepository::get(db, username)?;
                Ok(ReservationCounts {
                    total: ReservationRepository::count_for_user(db, username),
                    upcoming: ReservationRepository::count_upcoming_for_user(db, username, today),
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{db::MemoryPersistence, test_support::user_with_password};

    async fn store_with_user(name: &str, password: &str) -> Store {
        let store = Store::open(Arc::new(MemoryPersistence::new())).await.unwrap();
        let user = user_with_password(password, Role::User);
        store
            .transaction(|db| {
                UserRepository::upsert(db, name, user);
                Ok(())
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_credit_changes_clamp() {
        let store = store_with_user("ombrellone1", "ombrellone1").await;

        assert_eq!(
            UserService::update_credits(&store, "ombrellone1", CreditChange::Delta(-2))
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            UserService::update_credits(&store, "ombrellone1", CreditChange::Set(5))
                .await
                .unwrap(),
            5
        );
        assert_eq!(
            UserService::update_credits(&store, "ombrellone1", CreditChange::Delta(-1))
                .await
                .unwrap(),
            4
        );
        assert!(
            UserService::update_credits(&store, "nobody", CreditChange::Delta(1))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_upsert_keeps_existing_values() {
        let store = store_with_user("ospite1", "old").await;
        UserService::update_credits(&store, "ospite1", CreditChange::Set(7))
            .await
            .unwrap();

        let user = UserService::upsert_user(
            &store,
            "ospite1",
            UserUpsert {
                password: "new".into(),
                ..UserUpsert::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(user.credits, 7);
        assert_eq!(user.role, Role::User);
        assert!(verify_password("new", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_upsert_requires_password() {
        let store = store_with_user("ospite1", "old").await;
        let result = UserService::upsert_user(&store, "ospite2", UserUpsert::default()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_self_password_change_needs_current() {
        let store = store_with_user("delfino3", "delfino3").await;

        let missing = UserService::change_password(&store, false, "delfino3", None, "x").await;
        assert!(matches!(missing, Err(AppError::Validation(_))));

        let wrong =
            UserService::change_password(&store, false, "delfino3", Some("nope"), "x").await;
        assert!(matches!(wrong, Err(AppError::Forbidden(_))));

        UserService::change_password(&store, false, "delfino3", Some("delfino3"), "fresh")
            .await
            .unwrap();
        let user = UserService::get_user(&store, "delfino3").await.unwrap();
        assert!(verify_password("fresh", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_admin_password_reset() {
        let store = store_with_user("delfino4", "delfino4").await;
        UserService::change_password(&store, true, "delfino4", None, "reset")
            .await
            .unwrap();
        let user = UserService::get_user(&store, "delfino4").await.unwrap();
        assert!(verify_password("reset", &user.password_hash).unwrap());
    }
}
