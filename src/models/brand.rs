use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{
    Brand as DomainBrand, NewBrand as DomainNewBrand, UpdateBrand as DomainUpdateBrand,
};
use crate::domain::types::{BrandId, BrandName, BusinessId, Description, TypeConstraintError, WebUrl};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
pub struct Brand {
    pub id: i32,
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
pub struct NewBrand<'a> {
    pub business_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::brands)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBrand<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub logo_url: Option<&'a str>,
}

impl TryFrom<Brand> for DomainBrand {
    type Error = TypeConstraintError;

    fn try_from(brand: Brand) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BrandId::new(brand.id)?,
            business_id: BusinessId::new(brand.business_id)?,
            name: BrandName::new(brand.name)?,
            description: optional(brand.description, Description::new)?,
            logo_url: optional(brand.logo_url, WebUrl::new)?,
            status: brand.status.parse()?,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBrand> for NewBrand<'a> {
    fn from(brand: &'a DomainNewBrand) -> Self {
        Self {
            business_id: brand.business_id.get(),
            name: brand.name.as_str(),
            description: brand.description.as_ref().map(Description::as_str),
            logo_url: brand.logo_url.as_ref().map(WebUrl::as_str),
            status: brand.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateBrand> for UpdateBrand<'a> {
    fn from(brand: &'a DomainUpdateBrand) -> Self {
        Self {
            name: brand.name.as_str(),
            description: brand.description.as_ref().map(Description::as_str),
            logo_url: brand.logo_url.as_ref().map(WebUrl::as_str),
        }
    }
}
