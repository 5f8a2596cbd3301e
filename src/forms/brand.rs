use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::types::{BrandName, BusinessId, Description, EntityStatus, WebUrl};
use crate::forms::{FormError, non_blank, optional_field};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrandForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl BrandForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            logo_url: non_blank(self.logo_url),
            status: non_blank(self.status),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrandPayload {
    pub name: BrandName,
    pub description: Option<Description>,
    pub logo_url: Option<WebUrl>,
    pub status: EntityStatus,
}

impl TryFrom<BrandForm> for BrandPayload {
    type Error = FormError;

    fn try_from(form: BrandForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        Ok(Self {
            name: BrandName::new(form.name).map_err(|_| FormError::InvalidText("name"))?,
            description: optional_field(
                form.description,
                Description::new,
                FormError::InvalidText("description"),
            )?,
            logo_url: optional_field(form.logo_url, WebUrl::new, FormError::InvalidUrl("logoUrl"))?,
            status: optional_field(
                form.status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
        })
    }
}

impl BrandPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewBrand {
        NewBrand {
            business_id,
            name: self.name,
            description: self.description,
            logo_url: self.logo_url,
            status: self.status,
        }
    }

    pub fn into_update(self) -> UpdateBrand {
        UpdateBrand {
            name: self.name,
            description: self.description,
            logo_url: self.logo_url,
        }
    }
}

impl DraftForm for BrandForm {
    type Record = Brand;
    type Payload = BrandPayload;
    const FIELDS: &'static [&'static str] = &["name", "description", "logoUrl", "status"];

    fn from_record(brand: &Brand) -> Self {
        Self {
            name: brand.name.to_string(),
            description: brand.description.as_ref().map(ToString::to_string),
            logo_url: brand.logo_url.as_ref().map(ToString::to_string),
            status: Some(brand.status.to_string()),
        }
    }

    fn into_payload(self) -> Result<BrandPayload, FormError> {
        BrandPayload::try_from(self)
    }
}
