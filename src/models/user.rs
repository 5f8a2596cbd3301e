//! Diesel models for dashboard users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    BusinessId, Email, PersonName, PhoneNumber, TypeConstraintError, UserId, WebUrl,
};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub business_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub account_status: String,
    pub avatar_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub business_id: i32,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub account_status: &'a str,
    pub avatar_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`User`] record.
pub struct UpdateUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub avatar_url: Option<&'a str>,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            business_id: BusinessId::new(user.business_id)?,
            full_name: PersonName::new(user.full_name)?,
            email: Email::new(user.email)?,
            phone: optional(user.phone, PhoneNumber::new)?,
            role: user.role.parse()?,
            account_status: user.account_status.parse()?,
            avatar_url: optional(user.avatar_url, WebUrl::new)?,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            business_id: user.business_id.get(),
            full_name: user.full_name.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            role: user.role.as_str(),
            account_status: user.account_status.as_str(),
            avatar_url: user.avatar_url.as_ref().map(WebUrl::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            full_name: user.full_name.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            role: user.role.as_str(),
            avatar_url: user.avatar_url.as_ref().map(WebUrl::as_str),
        }
    }
}
