//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::{hash_password, verify_password};
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::{parse_date, validate_username};
