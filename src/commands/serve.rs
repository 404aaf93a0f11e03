//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{
    Config, BOOTSTRAP_ADMIN_LOGIN, BOOTSTRAP_ADMIN_NAME, SYSTEM_PRINCIPAL,
};
use crate::domain::{Gender, NewUser};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Initialize database
    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    // Seed the initial admin account so the admin-only endpoints are
    // reachable on a fresh install
    seed_admin(Arc::new(UserStore::new(db.get_connection())), &config).await?;

    // Create application state
    let app_state = AppState::from_config(db, config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Create the bootstrap admin account when the store is empty.
async fn seed_admin(repo: Arc<dyn UserRepository>, config: &Config) -> AppResult<()> {
    if repo.count().await? > 0 {
        return Ok(());
    }

    let password = match config.bootstrap_admin_password() {
        Some(p) => p.to_string(),
        None => {
            tracing::warn!(
                "Store is empty and BOOTSTRAP_ADMIN_PASSWORD is not set; \
                 skipping admin seed"
            );
            return Ok(());
        }
    };

    let users = UserManager::new(repo);
    users
        .create_user(
            NewUser {
                login: BOOTSTRAP_ADMIN_LOGIN.to_string(),
                password,
                name: BOOTSTRAP_ADMIN_NAME.to_string(),
                gender: Gender::Unspecified,
                birthday: None,
                is_admin: true,
            },
            SYSTEM_PRINCIPAL.to_string(),
        )
        .await?;

    tracing::warn!(
        "Seeded initial '{}' account; change its password after first login",
        BOOTSTRAP_ADMIN_LOGIN
    );

    Ok(())
}
