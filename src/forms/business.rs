use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::business::{BusinessProfile, SaveBusinessProfile};
use crate::domain::types::{
    BusinessId, BusinessName, CurrencyCode, Description, Email, PhoneNumber, WebUrl,
};
use crate::forms::{FormError, non_blank, optional_field};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Business profile settings form.
pub struct BusinessProfileForm {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl BusinessProfileForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            website: non_blank(self.website),
            logo_url: non_blank(self.logo_url),
            currency: non_blank(self.currency),
            description: non_blank(self.description),
        }
    }
}

impl From<&BusinessProfile> for BusinessProfileForm {
    fn from(profile: &BusinessProfile) -> Self {
        Self {
            name: profile.name.to_string(),
            email: profile.email.as_ref().map(ToString::to_string),
            phone: profile.phone.as_ref().map(ToString::to_string),
            website: profile.website.as_ref().map(ToString::to_string),
            logo_url: profile.logo_url.as_ref().map(ToString::to_string),
            currency: Some(profile.currency.to_string()),
            description: profile.description.as_ref().map(ToString::to_string),
        }
    }
}

pub struct BusinessProfilePayload {
    pub name: BusinessName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub logo_url: Option<WebUrl>,
    pub currency: CurrencyCode,
    pub description: Option<Description>,
}

impl TryFrom<BusinessProfileForm> for BusinessProfilePayload {
    type Error = FormError;

    fn try_from(form: BusinessProfileForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        Ok(Self {
            name: BusinessName::new(form.name).map_err(|_| FormError::InvalidText("name"))?,
            email: optional_field(form.email, Email::new, FormError::InvalidEmail)?,
            phone: optional_field(form.phone, PhoneNumber::new, FormError::InvalidPhoneNumber)?,
            website: optional_field(form.website, WebUrl::new, FormError::InvalidUrl("website"))?,
            logo_url: optional_field(form.logo_url, WebUrl::new, FormError::InvalidUrl("logoUrl"))?,
            currency: optional_field(form.currency, CurrencyCode::new, FormError::InvalidCurrency)?
                .unwrap_or_default(),
            description: optional_field(
                form.description,
                Description::new,
                FormError::InvalidText("description"),
            )?,
        })
    }
}

impl BusinessProfilePayload {
    pub fn into_domain(self, business_id: BusinessId) -> SaveBusinessProfile {
        SaveBusinessProfile {
            business_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            website: self.website,
            logo_url: self.logo_url,
            currency: self.currency,
            description: self.description,
        }
    }
}
