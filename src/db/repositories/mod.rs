//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod area;
pub mod cafe;
pub mod user;

pub use area::{AreaRepository, SqlxAreaRepository};
pub use cafe::{CafeRepository, SqlxCafeRepository};
pub use user::{SqlxUserRepository, UserRepository};
