//! Startup provisioning and seed accounts

use crate::{
    constants::ADMIN_USERNAME,
    db::{Store, repositories::UserRepository},
    error::AppResult,
    models::{Role, User},
    utils::hash_password,
};

/// Summary of a provisioning run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub migrated_passwords: usize,
    pub created_users: Vec<String>,
}

/// Prepare a freshly opened store: hash legacy plaintext passwords and make
/// sure an `admin` account exists.
pub async fn bootstrap(store: &Store, admin_password: &str) -> AppResult<ProvisionReport> {
    let legacy: Vec<(String, String)> = store
        .read(|db| {
            db.users
                .iter()
                .filter_map(|(name, user)| {
                    user.password.clone().map(|plain| (name.clone(), plain))
                })
                .collect()
        })
        .await;

    let mut hashed = Vec::with_capacity(legacy.len());
    for (username, plain) in legacy {
        hashed.push((username, hash_password(&plain)?));
    }

    let needs_admin = !store.read(|db| UserRepository::exists(db, ADMIN_USERNAME)).await;
    let admin_hash = if needs_admin {
        Some(hash_password(admin_password)?)
    } else {
        None
    };

    if hashed.is_empty() && admin_hash.is_none() {
        return Ok(ProvisionReport::default());
    }

    let report = store
        .transaction(|db| {
            let mut report = ProvisionReport::default();

            for (username, hash) in hashed {
                if let Ok(user) = UserRepository::get_mut(db, &username) {
                    user.password_hash = hash;
                    user.password = None;
                    report.migrated_passwords += 1;
                }
            }

            if let Some(hash) = admin_hash {
                if !UserRepository::exists(db, ADMIN_USERNAME) {
                    UserRepository::upsert(db, ADMIN_USERNAME, User::new(hash, Role::Admin));
                    report.created_users.push(ADMIN_USERNAME.to_string());
                }
            }

            Ok(report)
        })
        .await?;

    if report.migrated_passwords > 0 {
        tracing::info!(count = report.migrated_passwords, "Hashed legacy plaintext passwords");
    }
    if !report.created_users.is_empty() {
        tracing::warn!(
            username = ADMIN_USERNAME,
            "Created default admin account; change its password"
        );
    }

    Ok(report)
}

/// Usernames of the standard seed accounts
pub fn seed_usernames() -> Vec<String> {
    let umbrellas = (1..=200).map(|n| format!("ombrellone{n}"));
    let guests = (1..=5).map(|n| format!("ospite{n}"));
    let dolphins = (1..=5).map(|n| format!("delfino{n}"));

    umbrellas.chain(guests).chain(dolphins).collect()
}

/// Add the seed accounts that do not exist yet. Each gets role `user`,
/// no credits, and its own username as password.
pub async fn seed_users(store: &Store, admin_password: &str) -> AppResult<ProvisionReport> {
    let mut report = bootstrap(store, admin_password).await?;

    let missing: Vec<String> = store
        .read(|db| {
            seed_usernames()
                .into_iter()
                .filter(|name| !UserRepository::exists(db, name))
                .collect()
        })
        .await;

    let mut accounts = Vec::with_capacity(missing.len());
    for username in missing {
        let hash = hash_password(&username)?;
        accounts.push((username, hash));
    }

    let created = store
        .transaction(|db| {
            let mut created = Vec::new();
            for (username, hash) in accounts {
                if !UserRepository::exists(db, &username) {
                    UserRepository::upsert(db, &username, User::new(hash, Role::User));
                    created.push(username);
                }
            }
            Ok(created)
        })
        .await?;

    tracing::info!(created = created.len(), "Seed accounts provisioned");
    report.created_users.extend(created);
    Ok(report)
}
