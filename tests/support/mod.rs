//! Shared test support: an in-memory account store and router setup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Months, Utc};
use uuid::Uuid;

use user_registry::api::{create_router, AppState};
use user_registry::domain::User;
use user_registry::errors::{AppError, AppResult};
use user_registry::infra::{Database, UserRepository};
use user_registry::services::Services;
use user_registry::Config;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// In-memory implementation of the account store for tests.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot a record by login for assertions
    pub fn snapshot(&self, login: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.login == login)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_login(&self, login: String) -> AppResult<Option<User>> {
        Ok(self.snapshot(&login))
    }

    async fn exists_login(&self, login: String) -> AppResult<bool> {
        Ok(self.snapshot(&login).is_some())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        if self.users.lock().unwrap().remove(&id).is_none() {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.is_active())
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn list_older_than(&self, age: u32) -> AppResult<Vec<User>> {
        let cutoff = Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(age.saturating_mul(12)))
            .ok_or_else(|| AppError::BadRequest(format!("Age {} is out of range", age)))?;

        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| matches!(u.birthday, Some(b) if b < cutoff))
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

/// Build the real services over the in-memory store.
#[allow(dead_code)]
pub fn test_services(repo: Arc<InMemoryUserRepo>) -> Services {
    Services::from_repository(repo, Config::for_tests(TEST_SECRET))
}

/// Build the full application router over the in-memory store.
#[allow(dead_code)]
pub fn test_app(repo: Arc<InMemoryUserRepo>) -> axum::Router {
    let services = test_services(repo);
    let database = Arc::new(Database::from_connection(
        sea_orm::DatabaseConnection::default(),
    ));
    let state = AppState::new(services.auth(), services.users(), database);
    create_router(state)
}
