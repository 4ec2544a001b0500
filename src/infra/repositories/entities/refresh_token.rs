//! Refresh token database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{IdentityId, RefreshToken};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub identity_id: Uuid,
    #[sea_orm(unique)]
    pub token: String,
    pub jwt_id: String,
    pub is_used: bool,
    pub is_revoked: bool,
    pub expiry_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RefreshToken {
    fn from(model: Model) -> Self {
        RefreshToken {
            id: model.id,
            identity_id: IdentityId::new(model.identity_id),
            token: model.token,
            jwt_id: model.jwt_id,
            is_used: model.is_used,
            is_revoked: model.is_revoked,
            expiry_date: model.expiry_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RefreshToken> for ActiveModel {
    fn from(token: RefreshToken) -> Self {
        ActiveModel {
            id: Set(token.id),
            identity_id: Set(token.identity_id.as_uuid()),
            token: Set(token.token),
            jwt_id: Set(token.jwt_id),
            is_used: Set(token.is_used),
            is_revoked: Set(token.is_revoked),
            expiry_date: Set(token.expiry_date),
            created_at: Set(token.created_at),
            updated_at: Set(token.updated_at),
        }
    }
}
