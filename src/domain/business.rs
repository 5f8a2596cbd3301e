//! Business profile settings of a tenant.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BusinessId, BusinessName, CurrencyCode, Description, Email, PhoneNumber, WebUrl,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_id: BusinessId,
    pub name: BusinessName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub logo_url: Option<WebUrl>,
    pub currency: CurrencyCode,
    pub description: Option<Description>,
    pub updated_at: NaiveDateTime,
}

/// Full replacement of the profile; the record is created on first save.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveBusinessProfile {
    pub business_id: BusinessId,
    pub name: BusinessName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub logo_url: Option<WebUrl>,
    pub currency: CurrencyCode,
    pub description: Option<Description>,
}
