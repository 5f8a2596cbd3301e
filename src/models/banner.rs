//! Diesel models for storefront banners.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::banner::{
    Banner as DomainBanner, NewBanner as DomainNewBanner, UpdateBanner as DomainUpdateBanner,
};
use crate::domain::types::{
    BannerId, BannerTitle, BusinessId, Description, TypeConstraintError, WebUrl,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::banners)]
pub struct Banner {
    pub id: i32,
    pub business_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::banners)]
pub struct NewBanner<'a> {
    pub business_id: i32,
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub image_url: &'a str,
    pub link_url: Option<&'a str>,
    pub position: i32,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::banners)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBanner<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub image_url: &'a str,
    pub link_url: Option<&'a str>,
    pub position: i32,
}

impl TryFrom<Banner> for DomainBanner {
    type Error = TypeConstraintError;

    fn try_from(banner: Banner) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BannerId::new(banner.id)?,
            business_id: BusinessId::new(banner.business_id)?,
            title: BannerTitle::new(banner.title)?,
            subtitle: optional(banner.subtitle, Description::new)?,
            image_url: WebUrl::new(banner.image_url)?,
            link_url: optional(banner.link_url, WebUrl::new)?,
            position: banner.position,
            status: banner.status.parse()?,
            created_at: banner.created_at,
            updated_at: banner.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBanner> for NewBanner<'a> {
    fn from(banner: &'a DomainNewBanner) -> Self {
        Self {
            business_id: banner.business_id.get(),
            title: banner.title.as_str(),
            subtitle: banner.subtitle.as_ref().map(Description::as_str),
            image_url: banner.image_url.as_str(),
            link_url: banner.link_url.as_ref().map(WebUrl::as_str),
            position: banner.position,
            status: banner.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateBanner> for UpdateBanner<'a> {
    fn from(banner: &'a DomainUpdateBanner) -> Self {
        Self {
            title: banner.title.as_str(),
            subtitle: banner.subtitle.as_ref().map(Description::as_str),
            image_url: banner.image_url.as_str(),
            link_url: banner.link_url.as_ref().map(WebUrl::as_str),
            position: banner.position,
        }
    }
}
