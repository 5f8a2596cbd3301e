use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::address::{
    Address as DomainAddress, NewAddress as DomainNewAddress, UpdateAddress as DomainUpdateAddress,
};
use crate::domain::types::{
    AddressId, AddressLabel, BusinessId, GeoPoint, NonEmptyString, TypeConstraintError,
};
use crate::models::optional_text;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct Address {
    pub id: i32,
    pub business_id: i32,
    pub label: String,
    pub street: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_default: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress<'a> {
    pub business_id: i32,
    pub label: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub region: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub country: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub is_default: bool,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAddress<'a> {
    pub label: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub region: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub country: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub is_default: bool,
}

impl TryFrom<Address> for DomainAddress {
    type Error = TypeConstraintError;

    fn try_from(address: Address) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressId::new(address.id)?,
            business_id: BusinessId::new(address.business_id)?,
            label: AddressLabel::new(address.label)?,
            street: NonEmptyString::new(address.street)?,
            city: NonEmptyString::new(address.city)?,
            region: optional_text(address.region)?,
            postal_code: optional_text(address.postal_code)?,
            country: NonEmptyString::new(address.country)?,
            location: GeoPoint::new(address.latitude, address.longitude)?,
            is_default: address.is_default,
            status: address.status.parse()?,
            created_at: address.created_at,
            updated_at: address.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(address: &'a DomainNewAddress) -> Self {
        Self {
            business_id: address.business_id.get(),
            label: address.label.as_str(),
            street: address.street.as_str(),
            city: address.city.as_str(),
            region: address.region.as_ref().map(NonEmptyString::as_str),
            postal_code: address.postal_code.as_ref().map(NonEmptyString::as_str),
            country: address.country.as_str(),
            latitude: address.location.latitude(),
            longitude: address.location.longitude(),
            is_default: address.is_default,
            status: address.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateAddress> for UpdateAddress<'a> {
    fn from(address: &'a DomainUpdateAddress) -> Self {
        Self {
            label: address.label.as_str(),
            street: address.street.as_str(),
            city: address.city.as_str(),
            region: address.region.as_ref().map(NonEmptyString::as_str),
            postal_code: address.postal_code.as_ref().map(NonEmptyString::as_str),
            country: address.country.as_str(),
            latitude: address.location.latitude(),
            longitude: address.location.longitude(),
            is_default: address.is_default,
        }
    }
}
