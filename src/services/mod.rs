//! Services layer - Business logic
//!
//! This module contains all business logic services for the café directory.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories
//! - Handling validation and error cases

pub mod area;
pub mod cafe;
pub mod password;
pub mod token;
pub mod user;

pub use area::{AreaService, AreaServiceError};
pub use cafe::{CafeService, CafeServiceError};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
pub use token::{TokenClaims, TokenError, TokenService};
pub use user::{
    LoginInput, LoginOutcome, UserService, UserServiceError, ValidationIssue,
};
