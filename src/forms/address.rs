use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::address::{Address, NewAddress, UpdateAddress};
use crate::domain::types::{
    AddressLabel, BusinessId, EntityStatus, GeoPoint, NonEmptyString, TypeConstraintError,
};
use crate::forms::{FormError, flag, non_blank, optional_field, scalar};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    #[validate(length(min = 1, max = 64))]
    pub label: String,
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub country: String,
    /// Set by the map picker.
    #[serde(default, deserialize_with = "scalar")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub longitude: Option<String>,
    /// Checkbox value; absent when unchecked.
    #[serde(default, deserialize_with = "scalar")]
    pub is_default: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl AddressForm {
    fn normalized(self) -> Self {
        Self {
            label: self.label.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            region: non_blank(self.region),
            postal_code: non_blank(self.postal_code),
            country: self.country.trim().to_string(),
            latitude: non_blank(self.latitude),
            longitude: non_blank(self.longitude),
            is_default: non_blank(self.is_default),
            status: non_blank(self.status),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddressPayload {
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

fn coordinate(raw: Option<String>, field: &'static str) -> Result<f64, FormError> {
    raw.and_then(|value| value.parse::<f64>().ok())
        .ok_or(FormError::InvalidCoordinates(field))
}

impl TryFrom<AddressForm> for AddressPayload {
    type Error = FormError;

    fn try_from(form: AddressForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        let latitude = coordinate(form.latitude, "latitude")?;
        let longitude = coordinate(form.longitude, "longitude")?;
        let location = GeoPoint::new(latitude, longitude).map_err(|err| match err {
            TypeConstraintError::OutOfRange("longitude") => {
                FormError::InvalidCoordinates("longitude")
            }
            _ => FormError::InvalidCoordinates("latitude"),
        })?;
        let required = |value: String, field: &'static str| {
            NonEmptyString::new(value).map_err(|_| FormError::InvalidText(field))
        };

        Ok(Self {
            label: AddressLabel::new(form.label).map_err(|_| FormError::InvalidText("label"))?,
            street: required(form.street, "street")?,
            city: required(form.city, "city")?,
            region: optional_field(
                form.region,
                NonEmptyString::new,
                FormError::InvalidText("region"),
            )?,
            postal_code: optional_field(
                form.postal_code,
                NonEmptyString::new,
                FormError::InvalidText("postalCode"),
            )?,
            country: required(form.country, "country")?,
            location,
            is_default: flag(form.is_default.as_deref()),
            status: optional_field(
                form.status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
        })
    }
}

impl AddressPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewAddress {
        NewAddress {
            business_id,
            label: self.label,
            street: self.street,
            city: self.city,
            region: self.region,
            postal_code: self.postal_code,
            country: self.country,
            location: self.location,
            is_default: self.is_default,
            status: self.status,
        }
    }

    pub fn into_update(self) -> UpdateAddress {
        UpdateAddress {
            label: self.label,
            street: self.street,
            city: self.city,
            region: self.region,
            postal_code: self.postal_code,
            country: self.country,
            location: self.location,
            is_default: self.is_default,
        }
    }
}

impl DraftForm for AddressForm {
    type Record = Address;
    type Payload = AddressPayload;
    const FIELDS: &'static [&'static str] = &[
        "label",
        "street",
        "city",
        "region",
        "postalCode",
        "country",
        "latitude",
        "longitude",
        "isDefault",
        "status",
    ];

    fn from_record(address: &Address) -> Self {
        let text = |value: &NonEmptyString| value.as_str().to_string();
        Self {
            label: address.label.to_string(),
            street: text(&address.street),
            city: text(&address.city),
            region: address.region.as_ref().map(text),
            postal_code: address.postal_code.as_ref().map(text),
            country: text(&address.country),
            latitude: Some(address.location.latitude().to_string()),
            longitude: Some(address.location.longitude().to_string()),
            is_default: address.is_default.then(|| "on".to_string()),
            status: Some(address.status.to_string()),
        }
    }

    fn into_payload(self) -> Result<AddressPayload, FormError> {
        AddressPayload::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddressForm {
        AddressForm {
            label: "Warehouse".into(),
            street: " 1 Dock Road ".into(),
            city: "Hamburg".into(),
            region: Some("".into()),
            postal_code: Some("20457".into()),
            country: "Germany".into(),
            latitude: Some("53.54".into()),
            longitude: Some("9.98".into()),
            is_default: Some("on".into()),
            status: None,
        }
    }

    #[test]
    fn parses_location_and_checkbox() {
        let payload = AddressPayload::try_from(form()).unwrap();
        assert_eq!(payload.street.as_str(), "1 Dock Road");
        assert_eq!(payload.region, None);
        assert!(payload.is_default);
        assert_eq!(payload.location.latitude(), 53.54);
    }

    #[test]
    fn missing_coordinates_are_rejected() {
        let mut form = form();
        form.longitude = None;
        assert!(matches!(
            AddressPayload::try_from(form),
            Err(FormError::InvalidCoordinates("longitude"))
        ));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let mut form = form();
        form.latitude = Some("95".into());
        assert!(matches!(
            AddressPayload::try_from(form),
            Err(FormError::InvalidCoordinates("latitude"))
        ));
    }

    #[test]
    fn out_of_range_longitude_is_reported_on_longitude() {
        let mut form = form();
        form.longitude = Some("200".into());
        let err = AddressPayload::try_from(form).unwrap_err();
        assert_eq!(err.field().as_deref(), Some("longitude"));
    }

    #[test]
    fn unchecked_box_is_not_default() {
        let mut form = form();
        form.is_default = None;
        assert!(!AddressPayload::try_from(form).unwrap().is_default);
    }
}
