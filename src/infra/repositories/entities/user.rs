//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{IdentityId, User, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identity_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Date,
    pub country: String,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub mobile_number: Option<String>,
    pub status: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            identity_id: IdentityId::new(model.identity_id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            date_of_birth: model.date_of_birth,
            country: model.country,
            address: model.address,
            sex: model.sex,
            mobile_number: model.mobile_number,
            status: UserStatus::from(model.status),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full row for inserting a staged user
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            identity_id: Set(user.identity_id.as_uuid()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone: Set(user.phone),
            date_of_birth: Set(user.date_of_birth),
            country: Set(user.country),
            address: Set(user.address),
            sex: Set(user.sex),
            mobile_number: Set(user.mobile_number),
            status: Set(user.status.code()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}
