//! Shared fixtures for unit tests

use std::path::PathBuf;

use crate::{
    config::{BookingConfig, Config, JwtConfig, LogFormat, ServerConfig, StorageConfig},
    models::{Role, User},
    utils::hash_password,
};

/// Configuration that never touches the environment
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Text,
        },
        storage: StorageConfig {
            db_file: PathBuf::from("unused.json"),
        },
        jwt: JwtConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
            expiry_hours: 12,
        },
        booking: BookingConfig {
            admin_password: "admin".to_string(),
            auto_reset_hour: None,
        },
    }
}

/// A user whose password hash matches `password`
pub fn user_with_password(password: &str, role: Role) -> User {
    User::new(hash_password(password).unwrap(), role)
}
