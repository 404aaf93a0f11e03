//! User repository implementation backed by SeaORM.
//!
//! No business rules live here: revocation checks and audit stamping are a
//! service/domain concern. Lookups are keyed by the current login value and
//! include revoked accounts; `list_active` is the only state-filtered query.

use async_trait::async_trait;
use chrono::{Months, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Account store trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by current login, revoked accounts included
    async fn find_by_login(&self, login: String) -> AppResult<Option<User>>;

    /// Check whether any account (active or revoked) holds the login
    async fn exists_login(&self, login: String) -> AppResult<bool>;

    /// Insert a new user
    async fn create(&self, user: User) -> AppResult<User>;

    /// Persist every mutable field of an already-loaded user
    async fn save(&self, user: User) -> AppResult<()>;

    /// Permanently remove a user record
    async fn remove(&self, id: Uuid) -> AppResult<()>;

    /// List active users ordered by creation time ascending
    async fn list_active(&self) -> AppResult<Vec<User>>;

    /// List users born more than `age` years ago, revoked included
    async fn list_older_than(&self, age: u32) -> AppResult<Vec<User>>;

    /// Total number of accounts in the store
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_login(&self, login: String) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Login.eq(&login))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_login(&self, login: String) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Login.eq(&login))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel::from(&user);
        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn save(&self, user: User) -> AppResult<()> {
        let active_model = ActiveModel::from(&user);
        active_model
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
                other => AppError::from(other),
            })?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::RevokedAt.is_null())
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn list_older_than(&self, age: u32) -> AppResult<Vec<User>> {
        let cutoff = Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(age.saturating_mul(12)))
            .ok_or_else(|| AppError::BadRequest(format!("Age {} is out of range", age)))?;

        // NULL birthdays never satisfy the comparison and drop out
        let models = UserEntity::find()
            .filter(user::Column::Birthday.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
