//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Gender, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub gender: i16,
    pub birthday: Option<Date>,
    pub is_admin: bool,
    pub created_by: String,
    pub created_at: DateTimeUtc,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTimeUtc>,
    /// Revocation audit; NULL pair = active account
    pub revoked_by: Option<String>,
    pub revoked_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            login: model.login,
            password_hash: model.password_hash,
            name: model.name,
            gender: Gender::from(model.gender),
            birthday: model.birthday,
            is_admin: model.is_admin,
            created_by: model.created_by,
            created_at: model.created_at,
            modified_by: model.modified_by,
            modified_at: model.modified_at,
            revoked_by: model.revoked_by,
            revoked_at: model.revoked_at,
        }
    }
}

/// Convert domain entity to a fully-set active model for insert or update
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id),
            login: Set(user.login.clone()),
            password_hash: Set(user.password_hash.clone()),
            name: Set(user.name.clone()),
            gender: Set(i16::from(user.gender)),
            birthday: Set(user.birthday),
            is_admin: Set(user.is_admin),
            created_by: Set(user.created_by.clone()),
            created_at: Set(user.created_at),
            modified_by: Set(user.modified_by.clone()),
            modified_at: Set(user.modified_at),
            revoked_by: Set(user.revoked_by.clone()),
            revoked_at: Set(user.revoked_at),
        }
    }
}
