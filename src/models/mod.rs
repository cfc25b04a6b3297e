//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod credit;
pub mod field;
pub mod reservation;
pub mod settings;
pub mod slot;
pub mod user;

pub use credit::*;
pub use field::*;
pub use reservation::*;
pub use settings::*;
pub use slot::*;
pub use user::*;
