//! Service container - centralized service construction and access.

use std::sync::Arc;

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::config::Config;
use crate::infra::{UserRepository, UserStore};

/// Concrete service container holding the application services.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Wire the services over a shared account store
    pub fn from_repository(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        let auth_service = Arc::new(Authenticator::new(repo.clone(), config));
        let user_service = Arc::new(UserManager::new(repo));

        Self {
            auth_service,
            user_service,
        }
    }

    /// Wire the services over a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db));
        Self::from_repository(repo, config)
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
