//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// STORAGE DEFAULTS
// =============================================================================

/// Default path of the JSON document holding all state
pub const DEFAULT_DB_FILE: &str = "db.json";

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 12;

/// Password of the bootstrap admin account when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Username of the bootstrap admin account
pub const ADMIN_USERNAME: &str = "admin";

/// Failed logins after which an admin account is disabled
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 64;

// =============================================================================
// BOOKING RULES
// =============================================================================

/// Slot grid for a booking day
pub mod slots {
    /// Hour of the first slot
    pub const FIRST_HOUR: u32 = 8;

    /// Hour of the last slot start (inclusive)
    pub const LAST_HOUR: u32 = 23;

    /// Length of one slot in minutes
    pub const LENGTH_MINUTES: i64 = 45;
}

/// Default cap on upcoming bookings per user
pub const DEFAULT_MAX_BOOKINGS_PER_USER: u32 = 2;

/// Credits debited per booking and refunded on advance cancellation
pub const CREDITS_PER_BOOKING: i64 = 1;

/// Number of promotional image slots managed by the admin
pub const IMAGE_SLOT_COUNT: usize = 12;

/// Fields created for a fresh document
pub const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("BeachVolley", "Beach Volley"),
    ("Calcio", "Beach Soccer"),
    ("Multi", "Multi-Sport"),
];

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, USER];
}

// =============================================================================
// HTTP
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Date format used in requests and the persisted document
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Slot label format
pub const TIME_FORMAT: &str = "%H:%M";
