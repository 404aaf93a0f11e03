//! Infrastructure layer - External systems integration
//!
//! Handles database connections, migrations, and the account store
//! implementation. Fetch-mutate-save sequences run as independent
//! calls without a transactional guard.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(test)]
pub use repositories::MockUserRepository;
