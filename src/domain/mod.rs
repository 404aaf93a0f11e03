//! Domain layer - Core business entities and logic
//!
//! Contains the account entity, its lifecycle rules, and the password
//! value object, independent of infrastructure concerns.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{Gender, NewUser, ProfileUpdate, User, UserResponse};
