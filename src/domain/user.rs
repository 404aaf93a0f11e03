//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// User gender, stored as a small integer on the wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(into = "i16", from = "i16")]
#[schema(example = 1)]
pub enum Gender {
    Female,
    Male,
    Unspecified,
}

impl From<i16> for Gender {
    fn from(v: i16) -> Self {
        match v {
            0 => Gender::Female,
            1 => Gender::Male,
            _ => Gender::Unspecified,
        }
    }
}

impl From<Gender> for i16 {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Female => 0,
            Gender::Male => 1,
            Gender::Unspecified => 2,
        }
    }
}

/// User domain entity.
///
/// Lifecycle: created active, optionally revoked (soft delete), restored,
/// or permanently removed. `revoked_by` and `revoked_at` are always set and
/// cleared together; both null means the account is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub is_admin: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub revoked_by: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user with audit stamps
    pub fn new(new_user: NewUser, password_hash: String, created_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            login: new_user.login,
            password_hash,
            name: new_user.name,
            gender: new_user.gender,
            birthday: new_user.birthday,
            is_admin: new_user.is_admin,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
            revoked_by: None,
            revoked_at: None,
        }
    }

    /// Check if user is active (not revoked)
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }

    /// Check if user is revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Fail with `Revoked` unless the account is active.
    ///
    /// Called before every profile, password, and login mutation; revoked
    /// accounts accept no changes other than restore.
    pub fn ensure_active(&self) -> AppResult<()> {
        if self.is_revoked() {
            return Err(AppError::Revoked(self.login.clone()));
        }
        Ok(())
    }

    /// Apply a partial profile update; unspecified fields stay untouched.
    pub fn apply_profile(&mut self, changes: ProfileUpdate, modified_by: &str) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(birthday) = changes.birthday {
            self.birthday = Some(birthday);
        }
        self.touch(modified_by);
    }

    /// Replace the stored credential material
    pub fn set_password(&mut self, password_hash: String, modified_by: &str) {
        self.password_hash = password_hash;
        self.touch(modified_by);
    }

    /// Change the login handle; the id stays stable
    pub fn rename(&mut self, new_login: String, modified_by: &str) {
        self.login = new_login;
        self.touch(modified_by);
    }

    /// Soft delete: stamp the revocation audit.
    ///
    /// Re-revoking an already revoked account overwrites the stamp.
    pub fn revoke(&mut self, revoked_by: &str) {
        self.revoked_by = Some(revoked_by.to_string());
        self.revoked_at = Some(Utc::now());
    }

    /// Restore a revoked account.
    ///
    /// Clears both revocation fields and nothing else; the modification
    /// audit is not affected. No-op if already active.
    pub fn restore(&mut self) {
        self.revoked_by = None;
        self.revoked_at = None;
    }

    fn touch(&mut self, modified_by: &str) {
        self.modified_by = Some(modified_by.to_string());
        self.modified_at = Some(Utc::now());
    }
}

/// Data needed to create a user (credential still in plain text)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub name: String,
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub is_admin: bool,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Login handle
    #[schema(example = "carol")]
    pub login: String,
    /// Display name
    #[schema(example = "Carol Jones")]
    pub name: String,
    /// Gender (0 = female, 1 = male, 2 = unspecified)
    pub gender: Gender,
    /// Date of birth
    pub birthday: Option<NaiveDate>,
    /// Revocation timestamp; absent for active accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            login: user.login,
            name: user.name,
            gender: user.gender,
            birthday: user.birthday,
            revoked_at: user.revoked_at,
        }
    }
}
