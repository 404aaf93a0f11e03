//! User handlers.
//!
//! Every handler runs its authorization policy first; the guarded operation
//! is never reached on denial.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_admin_or_self, CurrentUser};
use crate::api::AppState;
use crate::domain::{Gender, NewUser, ProfileUpdate, UserResponse};
use crate::errors::AppResult;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Login handle, unique across all accounts
    #[validate(length(min = 1, message = "Login is required"))]
    #[schema(example = "carol")]
    pub login: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Carol Jones")]
    pub name: String,
    /// Gender (0 = female, 1 = male, 2 = unspecified)
    #[validate(range(min = 0, max = 2, message = "Gender must be 0, 1 or 2"))]
    #[schema(example = 0)]
    pub gender: i16,
    /// Date of birth
    pub birthday: Option<NaiveDate>,
    /// Admin role flag, set only at creation
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Caroline Jones")]
    pub name: Option<String>,
    /// New gender (0 = female, 1 = male, 2 = unspecified)
    #[validate(range(min = 0, max = 2, message = "Gender must be 0, 1 or 2"))]
    pub gender: Option<i16>,
    /// New date of birth
    pub birthday: Option<NaiveDate>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/active", get(list_active_users))
        .route("/self", get(get_current_user))
        .route("/older-than/:age", get(list_users_older_than))
        .route("/:login", get(get_user_by_login).put(update_profile))
        .route("/:login/password/:new_password", put(update_password))
        .route("/:login/login/:new_login", put(update_login))
        .route("/:login/soft", delete(soft_delete_user))
        .route("/:login/hard", delete(hard_delete_user))
        .route("/:login/restore", put(restore_user))
}

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Login already exists")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&current_user)?;

    let user = state
        .user_service
        .create_user(
            NewUser {
                login: payload.login,
                password: payload.password,
                name: payload.name,
                gender: Gender::from(payload.gender),
                birthday: payload.birthday,
                is_admin: payload.is_admin,
            },
            current_user.login,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update profile fields (admin or self)
#[utoipa::path(
    put,
    path = "/users/{login}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("login" = String, Path, description = "Login handle")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Validation error or account revoked"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(login): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<StatusCode> {
    require_admin_or_self(&current_user, &login)?;

    state
        .user_service
        .update_profile(
            login,
            current_user.login,
            ProfileUpdate {
                name: payload.name,
                gender: payload.gender.map(Gender::from),
                birthday: payload.birthday,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change password (admin or self)
#[utoipa::path(
    put,
    path = "/users/{login}/password/{new_password}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("login" = String, Path, description = "Login handle"),
        ("new_password" = String, Path, description = "New password")
    ),
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Validation error or account revoked"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((login, new_password)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    require_admin_or_self(&current_user, &login)?;

    state
        .user_service
        .update_password(login, current_user.login, new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change login handle (admin or self)
#[utoipa::path(
    put,
    path = "/users/{login}/login/{new_login}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("login" = String, Path, description = "Current login handle"),
        ("new_login" = String, Path, description = "New login handle")
    ),
    responses(
        (status = 204, description = "Login updated"),
        (status = 400, description = "Validation error or account revoked"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Login already exists")
    )
)]
pub async fn update_login(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((login, new_login)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    require_admin_or_self(&current_user, &login)?;

    state
        .user_service
        .update_login(login, current_user.login, new_login)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List active users ordered by creation time (admin only)
#[utoipa::path(
    get,
    path = "/users/active",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_active_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&current_user)?;

    let users = state.user_service.list_active().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by login (admin only)
#[utoipa::path(
    get,
    path = "/users/{login}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("login" = String, Path, description = "Login handle")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_login(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let user = state.user_service.get_by_login(login).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/users/self",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_by_login(current_user.login).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List users older than the given age, revoked included (admin only)
#[utoipa::path(
    get,
    path = "/users/older-than/{age}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("age" = u32, Path, description = "Minimum age in years")),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users_older_than(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(age): Path<u32>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&current_user)?;

    let users = state.user_service.list_older_than(age).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Soft delete: revoke the account (admin only)
#[utoipa::path(
    delete,
    path = "/users/{login}/soft",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("login" = String, Path, description = "Login handle")),
    responses(
        (status = 204, description = "User revoked"),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn soft_delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;

    state
        .user_service
        .soft_delete(login, current_user.login)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Hard delete: permanently remove the account (admin only)
#[utoipa::path(
    delete,
    path = "/users/{login}/hard",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("login" = String, Path, description = "Login handle")),
    responses(
        (status = 204, description = "User removed"),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn hard_delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;

    state.user_service.hard_delete(login).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a revoked account (admin only)
#[utoipa::path(
    put,
    path = "/users/{login}/restore",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("login" = String, Path, description = "Login handle")),
    responses(
        (status = 204, description = "User restored"),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn restore_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;

    state.user_service.restore(login).await?;

    Ok(StatusCode::NO_CONTENT)
}
