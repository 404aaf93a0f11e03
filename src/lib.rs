//! User Registry - user management API
//!
//! Authenticates users via login/password, issues signed bearer tokens,
//! and exposes user CRUD endpoints gated by role-based authorization
//! (admin-only, admin-or-self) with a soft-delete account lifecycle.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: The account entity, lifecycle rules, password handling
//! - **services**: Authentication and account lifecycle use cases
//! - **infra**: Database, migrations, and the account store
//! - **api**: HTTP handlers, middleware, policies, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Gender, Password, User};
pub use errors::{AppError, AppResult};
