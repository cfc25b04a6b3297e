//! User repository

use crate::{
    db::Database,
    error::{AppError, AppResult},
    models::User,
};

/// Repository for user records
pub struct UserRepository;

impl UserRepository {
    /// Find user by username
    pub fn find<'a>(db: &'a Database, username: &str) -> Option<&'a User> {
        db.users.get(username)
    }

    /// Get user by username, failing when absent
    pub fn get<'a>(db: &'a Database, username: &str) -> AppResult<&'a User> {
        Self::find(db, username).ok_or_else(|| not_found(username))
    }

    /// Get a mutable user by username, failing when absent
    pub fn get_mut<'a>(db: &'a mut Database, username: &str) -> AppResult<&'a mut User> {
        db.users.get_mut(username).ok_or_else(|| not_found(username))
    }

    pub fn exists(db: &Database, username: &str) -> bool {
        db.users.contains_key(username)
    }

    /// Insert or replace a user
    pub fn upsert(db: &mut Database, username: &str, user: User) {
        db.users.insert(username.to_string(), user);
    }

    /// All users ordered by username
    pub fn list(db: &Database) -> impl Iterator<Item = (&String, &User)> {
        db.users.iter()
    }

    /// Count total users
    pub fn count(db: &Database) -> usize {
        db.users.len()
    }
}

fn not_found(username: &str) -> AppError {
    AppError::NotFound(format!("User {username} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_get_missing_user() {
        let db = Database::default();
        assert!(matches!(
            UserRepository::get(&db, "nobody"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_upsert_replaces() {
        let mut db = Database::default();
        UserRepository::upsert(&mut db, "delfino1", User::new("a".into(), Role::User));
        UserRepository::upsert(&mut db, "delfino1", User::new("b".into(), Role::Admin));

        assert_eq!(UserRepository::count(&db), 1);
        assert!(UserRepository::get(&db, "delfino1").unwrap().is_admin());
    }
}
