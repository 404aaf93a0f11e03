//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and the account store to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
pub use user_service::{UserManager, UserService};
