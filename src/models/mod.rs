//! Data models
//!
//! This module contains all data structures used throughout the café
//! directory. Models represent:
//! - Database entities (User, Cafe, Area)
//! - Internal data transfer objects

mod area;
mod cafe;
mod user;

pub use area::Area;
pub use cafe::{Cafe, CreateCafeInput};
pub use user::{CreateUserInput, UpdateUserInput, User};
