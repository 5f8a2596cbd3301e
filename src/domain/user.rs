//! Dashboard users belonging to a business.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BusinessId, Email, EntityStatus, PersonName, PhoneNumber, UserId, UserRole, WebUrl,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub business_id: BusinessId,
    pub full_name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub account_status: EntityStatus,
    pub avatar_url: Option<WebUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub business_id: BusinessId,
    pub full_name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub account_status: EntityStatus,
    pub avatar_url: Option<WebUrl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateUser {
    pub full_name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub avatar_url: Option<WebUrl>,
}
