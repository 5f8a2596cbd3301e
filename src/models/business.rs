use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::business::{
    BusinessProfile as DomainBusinessProfile, SaveBusinessProfile as DomainSaveBusinessProfile,
};
use crate::domain::types::{
    BusinessId, BusinessName, CurrencyCode, Description, Email, PhoneNumber, TypeConstraintError,
    WebUrl,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::businesses)]
#[diesel(primary_key(business_id))]
pub struct BusinessProfile {
    pub business_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub currency: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::businesses)]
#[diesel(treat_none_as_null = true)]
pub struct SaveBusinessProfile<'a> {
    pub business_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub currency: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BusinessProfile> for DomainBusinessProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: BusinessProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            business_id: BusinessId::new(profile.business_id)?,
            name: BusinessName::new(profile.name)?,
            email: optional(profile.email, Email::new)?,
            phone: optional(profile.phone, PhoneNumber::new)?,
            website: optional(profile.website, WebUrl::new)?,
            logo_url: optional(profile.logo_url, WebUrl::new)?,
            currency: CurrencyCode::new(profile.currency)?,
            description: optional(profile.description, Description::new)?,
            updated_at: profile.updated_at,
        })
    }
}

impl<'a> SaveBusinessProfile<'a> {
    pub fn from_domain(profile: &'a DomainSaveBusinessProfile, updated_at: NaiveDateTime) -> Self {
        Self {
            business_id: profile.business_id.get(),
            name: profile.name.as_str(),
            email: profile.email.as_ref().map(Email::as_str),
            phone: profile.phone.as_ref().map(PhoneNumber::as_str),
            website: profile.website.as_ref().map(WebUrl::as_str),
            logo_url: profile.logo_url.as_ref().map(WebUrl::as_str),
            currency: profile.currency.as_str(),
            description: profile.description.as_ref().map(Description::as_str),
            updated_at,
        }
    }
}
