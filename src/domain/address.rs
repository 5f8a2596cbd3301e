//! Business addresses picked on the map widget.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AddressId, AddressLabel, BusinessId, EntityStatus, GeoPoint, NonEmptyString};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub business_id: BusinessId,
    pub label: AddressLabel,
    pub street: NonEmptyString,
    pub city: NonEmptyString,
    pub region: Option<NonEmptyString>,
    pub postal_code: Option<NonEmptyString>,
    pub country: NonEmptyString,
    pub location: GeoPoint,
    /// At most one address per business carries this flag.
    pub is_default: bool,
    pub status: EntityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAddress {
    pub business_id: BusinessId,
    pub label: AddressLabel,
    pub street: NonEmptyString,
    pub city: NonEmptyString,
    pub region: Option<NonEmptyString>,
    pub postal_code: Option<NonEmptyString>,
    pub country: NonEmptyString,
    pub location: GeoPoint,
    pub is_default: bool,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAddress {
    pub label: AddressLabel,
    pub street: NonEmptyString,
    pub city: NonEmptyString,
    pub region: Option<NonEmptyString>,
    pub postal_code: Option<NonEmptyString>,
    pub country: NonEmptyString,
    pub location: GeoPoint,
    pub is_default: bool,
}
