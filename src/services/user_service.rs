//! User service - account lifecycle management.
//!
//! Every mutation follows the same shape: fetch by current login, check the
//! revocation state where the lifecycle demands it, apply the change through
//! the domain entity, persist. Soft delete, restore, and hard delete skip the
//! active check on purpose; see the individual operations.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, Password, ProfileUpdate, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new active user, auditing the acting principal
    async fn create_user(&self, new_user: NewUser, created_by: String) -> AppResult<User>;

    /// Get user by login, revoked accounts included
    async fn get_by_login(&self, login: String) -> AppResult<User>;

    /// List active users ordered by creation time ascending
    async fn list_active(&self) -> AppResult<Vec<User>>;

    /// List users older than `age` years, revoked accounts included
    async fn list_older_than(&self, age: u32) -> AppResult<Vec<User>>;

    /// Partial profile update (active accounts only)
    async fn update_profile(
        &self,
        login: String,
        modified_by: String,
        changes: ProfileUpdate,
    ) -> AppResult<()>;

    /// Replace the password (active accounts only)
    async fn update_password(
        &self,
        login: String,
        modified_by: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Change the login handle (active accounts only)
    async fn update_login(
        &self,
        login: String,
        modified_by: String,
        new_login: String,
    ) -> AppResult<()>;

    /// Soft delete: stamp the revocation audit, idempotent
    async fn soft_delete(&self, login: String, revoked_by: String) -> AppResult<()>;

    /// Clear the revocation audit, no-op for active accounts
    async fn restore(&self, login: String) -> AppResult<()>;

    /// Permanently remove the record, active or revoked
    async fn hard_delete(&self, login: String) -> AppResult<()>;
}

/// Concrete implementation of UserService over the account store.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, login: String) -> AppResult<User> {
        self.repo.find_by_login(login).await?.ok_or_not_found()
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, new_user: NewUser, created_by: String) -> AppResult<User> {
        if self.repo.exists_login(new_user.login.clone()).await? {
            return Err(AppError::conflict("Login"));
        }

        let password_hash = Password::new(&new_user.password)?.into_string();
        let user = User::new(new_user, password_hash, &created_by);
        self.repo.create(user).await
    }

    async fn get_by_login(&self, login: String) -> AppResult<User> {
        self.fetch(login).await
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        self.repo.list_active().await
    }

    async fn list_older_than(&self, age: u32) -> AppResult<Vec<User>> {
        self.repo.list_older_than(age).await
    }

    async fn update_profile(
        &self,
        login: String,
        modified_by: String,
        changes: ProfileUpdate,
    ) -> AppResult<()> {
        let mut user = self.fetch(login).await?;
        user.ensure_active()?;
        user.apply_profile(changes, &modified_by);
        self.repo.save(user).await
    }

    async fn update_password(
        &self,
        login: String,
        modified_by: String,
        new_password: String,
    ) -> AppResult<()> {
        let mut user = self.fetch(login).await?;
        user.ensure_active()?;
        let password_hash = Password::new(&new_password)?.into_string();
        user.set_password(password_hash, &modified_by);
        self.repo.save(user).await
    }

    async fn update_login(
        &self,
        login: String,
        modified_by: String,
        new_login: String,
    ) -> AppResult<()> {
        let mut user = self.fetch(login).await?;
        user.ensure_active()?;

        if new_login != user.login && self.repo.exists_login(new_login.clone()).await? {
            return Err(AppError::conflict("Login"));
        }

        user.rename(new_login, &modified_by);
        self.repo.save(user).await
    }

    async fn soft_delete(&self, login: String, revoked_by: String) -> AppResult<()> {
        // No active check: re-revoking overwrites the audit stamp
        let mut user = self.fetch(login).await?;
        user.revoke(&revoked_by);
        self.repo.save(user).await
    }

    async fn restore(&self, login: String) -> AppResult<()> {
        let mut user = self.fetch(login).await?;
        user.restore();
        self.repo.save(user).await
    }

    async fn hard_delete(&self, login: String) -> AppResult<()> {
        let user = self.fetch(login).await?;
        self.repo.remove(user.id).await
    }
}
