//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::{Gender, UserResponse};
use crate::services::TokenResponse;

/// OpenAPI documentation for the user registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry API",
        version = "0.1.0",
        description = "User management with JWT authentication and account lifecycle",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // User endpoints
        user_handler::create_user,
        user_handler::update_profile,
        user_handler::update_password,
        user_handler::update_login,
        user_handler::list_active_users,
        user_handler::get_user_by_login,
        user_handler::get_current_user,
        user_handler::list_users_older_than,
        user_handler::soft_delete_user,
        user_handler::hard_delete_user,
        user_handler::restore_user,
    ),
    components(
        schemas(
            Gender,
            UserResponse,
            TokenResponse,
            auth_handler::LoginRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the generated document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
