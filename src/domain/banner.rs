//! Promotional banners shown on the storefront.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BannerId, BannerTitle, BusinessId, Description, EntityStatus, WebUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub business_id: BusinessId,
    pub title: BannerTitle,
    pub subtitle: Option<Description>,
    pub image_url: WebUrl,
    pub link_url: Option<WebUrl>,
    /// Sort order on the storefront carousel, lowest first.
    pub position: i32,
    pub status: EntityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBanner {
    pub business_id: BusinessId,
    pub title: BannerTitle,
    pub subtitle: Option<Description>,
    pub image_url: WebUrl,
    pub link_url: Option<WebUrl>,
    pub position: i32,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBanner {
    pub title: BannerTitle,
    pub subtitle: Option<Description>,
    pub image_url: WebUrl,
    pub link_url: Option<WebUrl>,
    pub position: i32,
}
