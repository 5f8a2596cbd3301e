use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandId, BrandName, BusinessId, Description, EntityStatus, WebUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub business_id: BusinessId,
    pub name: BrandName,
    pub description: Option<Description>,
    pub logo_url: Option<WebUrl>,
    pub status: EntityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBrand {
    pub business_id: BusinessId,
    pub name: BrandName,
    pub description: Option<Description>,
    pub logo_url: Option<WebUrl>,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBrand {
    pub name: BrandName,
    pub description: Option<Description>,
    pub logo_url: Option<WebUrl>,
}
