use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::types::{BusinessId, CategoryName, Description, EntityStatus, WebUrl};
use crate::forms::{FormError, non_blank, optional_field};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CategoryForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            status: non_blank(self.status),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPayload {
    pub name: CategoryName,
    pub description: Option<Description>,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
}

impl TryFrom<CategoryForm> for CategoryPayload {
    type Error = FormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        Ok(Self {
            name: CategoryName::new(form.name).map_err(|_| FormError::InvalidText("name"))?,
            description: optional_field(
                form.description,
                Description::new,
                FormError::InvalidText("description"),
            )?,
            image_url: optional_field(
                form.image_url,
                WebUrl::new,
                FormError::InvalidUrl("imageUrl"),
            )?,
            status: optional_field(
                form.status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
        })
    }
}

impl CategoryPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewCategory {
        NewCategory {
            business_id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            status: self.status,
        }
    }

    pub fn into_update(self) -> UpdateCategory {
        UpdateCategory {
            name: self.name,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

impl DraftForm for CategoryForm {
    type Record = Category;
    type Payload = CategoryPayload;
    const FIELDS: &'static [&'static str] = &["name", "description", "imageUrl", "status"];

    fn from_record(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
            description: category.description.as_ref().map(ToString::to_string),
            image_url: category.image_url.as_ref().map(ToString::to_string),
            status: Some(category.status.to_string()),
        }
    }

    fn into_payload(self) -> Result<CategoryPayload, FormError> {
        CategoryPayload::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_sanitized() {
        let form = CategoryForm {
            name: " Kitchen ".into(),
            description: Some("<script>x</script>Pots and pans".into()),
            image_url: Some("/uploads/kitchen.png".into()),
            status: Some("inactive".into()),
        };
        let payload = CategoryPayload::try_from(form).unwrap();
        assert_eq!(payload.name.as_str(), "Kitchen");
        assert_eq!(
            payload.description.as_ref().map(Description::as_str),
            Some("Pots and pans")
        );
        assert_eq!(payload.status, EntityStatus::Inactive);
    }

    #[test]
    fn relative_junk_url_is_rejected() {
        let form = CategoryForm {
            name: "Kitchen".into(),
            image_url: Some("kitchen.png".into()),
            ..Default::default()
        };
        assert!(matches!(
            CategoryPayload::try_from(form),
            Err(FormError::InvalidUrl("imageUrl"))
        ));
    }
}
