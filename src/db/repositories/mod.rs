//! Document repositories
//!
//! Repositories handle all direct access to the document.

pub mod reservation_repo;
pub mod user_repo;

pub use reservation_repo::ReservationRepository;
pub use user_repo::UserRepository;
