//! Business logic services

pub mod admin_service;
pub mod archive_scheduler;
pub mod auth_service;
pub mod booking_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use archive_scheduler::ArchiveScheduler;
pub use auth_service::AuthService;
pub use booking_service::BookingService;
pub use user_service::UserService;
