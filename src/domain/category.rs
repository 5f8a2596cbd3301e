use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BusinessId, CategoryId, CategoryName, Description, EntityStatus, WebUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub business_id: BusinessId,
    pub name: CategoryName,
    pub description: Option<Description>,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCategory {
    pub business_id: BusinessId,
    pub name: CategoryName,
    pub description: Option<Description>,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateCategory {
    pub name: CategoryName,
    pub description: Option<Description>,
    pub image_url: Option<WebUrl>,
}
