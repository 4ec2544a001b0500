//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::IdentityId;
use crate::config::{STATUS_ACTIVE, STATUS_INACTIVE};

/// Lifecycle flag, serialized as its numeric code.
///
/// Codes other than the two known ones are kept as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStatus(i16);

impl UserStatus {
    pub const INACTIVE: UserStatus = UserStatus(STATUS_INACTIVE);
    pub const ACTIVE: UserStatus = UserStatus(STATUS_ACTIVE);

    pub fn code(self) -> i16 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 == STATUS_ACTIVE
    }
}

impl From<i16> for UserStatus {
    fn from(code: i16) -> Self {
        UserStatus(code)
    }
}

impl From<UserStatus> for i16 {
    fn from(status: UserStatus) -> Self {
        status.code()
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal identifier, generated by the store
    pub id: Uuid,
    /// Link to the external authentication identity
    #[schema(value_type = Uuid)]
    pub identity_id: IdentityId,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@x.com")]
    pub email: String,
    #[schema(example = "123")]
    pub phone: String,
    pub date_of_birth: NaiveDate,
    #[schema(example = "UK")]
    pub country: String,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub mobile_number: Option<String>,
    /// 1 = active, 0 = inactive
    #[schema(value_type = i16, example = 1)]
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an active user from provisioning data
    pub fn new(id: Uuid, new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            identity_id: new_user.identity_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            phone: new_user.phone,
            date_of_birth: new_user.date_of_birth,
            country: new_user.country,
            address: None,
            sex: None,
            mobile_number: None,
            status: UserStatus::ACTIVE,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only active profiles accept profile updates
    pub fn is_mutable(&self) -> bool {
        self.status.is_active()
    }

    /// Copy the self-service profile fields. Nothing else is touched.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        self.address = Some(update.address);
        self.sex = Some(update.sex);
        self.mobile_number = Some(update.mobile_number);
        self.country = update.country;
    }
}

/// Account provisioning data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub identity_id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
}

/// The mutable subset of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub address: String,
    pub sex: String,
    pub mobile_number: String,
    pub country: String,
}
