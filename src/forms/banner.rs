use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::banner::{Banner, NewBanner, UpdateBanner};
use crate::domain::types::{BannerTitle, BusinessId, Description, EntityStatus, WebUrl};
use crate::forms::{FormError, non_blank, optional_field, scalar};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BannerForm {
    #[validate(length(min = 1, max = 160))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    /// Banners cannot be shown without an image.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl BannerForm {
    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            subtitle: non_blank(self.subtitle),
            image_url: non_blank(self.image_url),
            link_url: non_blank(self.link_url),
            position: non_blank(self.position),
            status: non_blank(self.status),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BannerPayload {
    pub title: BannerTitle,
    pub subtitle: Option<Description>,
    pub image_url: WebUrl,
    pub link_url: Option<WebUrl>,
    pub position: i32,
    pub status: EntityStatus,
}

impl TryFrom<BannerForm> for BannerPayload {
    type Error = FormError;

    fn try_from(form: BannerForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        let image_url = form
            .image_url
            .ok_or(FormError::Required("imageUrl"))
            .and_then(|url| WebUrl::new(url).map_err(|_| FormError::InvalidUrl("imageUrl")))?;

        Ok(Self {
            title: BannerTitle::new(form.title).map_err(|_| FormError::InvalidText("title"))?,
            subtitle: optional_field(
                form.subtitle,
                Description::new,
                FormError::InvalidText("subtitle"),
            )?,
            image_url,
            link_url: optional_field(form.link_url, WebUrl::new, FormError::InvalidUrl("linkUrl"))?,
            position: optional_field(
                form.position,
                |raw| raw.parse::<i32>().ok().filter(|p| *p >= 0).ok_or(()),
                FormError::InvalidPosition,
            )?
            .unwrap_or(0),
            status: optional_field(
                form.status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
        })
    }
}

impl BannerPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewBanner {
        NewBanner {
            business_id,
            title: self.title,
            subtitle: self.subtitle,
            image_url: self.image_url,
            link_url: self.link_url,
            position: self.position,
            status: self.status,
        }
    }

    pub fn into_update(self) -> UpdateBanner {
        UpdateBanner {
            title: self.title,
            subtitle: self.subtitle,
            image_url: self.image_url,
            link_url: self.link_url,
            position: self.position,
        }
    }
}

impl DraftForm for BannerForm {
    type Record = Banner;
    type Payload = BannerPayload;
    const FIELDS: &'static [&'static str] = &[
        "title",
        "subtitle",
        "imageUrl",
        "linkUrl",
        "position",
        "status",
    ];

    fn from_record(banner: &Banner) -> Self {
        Self {
            title: banner.title.to_string(),
            subtitle: banner.subtitle.as_ref().map(ToString::to_string),
            image_url: Some(banner.image_url.to_string()),
            link_url: banner.link_url.as_ref().map(ToString::to_string),
            position: Some(banner.position.to_string()),
            status: Some(banner.status.to_string()),
        }
    }

    fn into_payload(self) -> Result<BannerPayload, FormError> {
        BannerPayload::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_is_required() {
        let form = BannerForm {
            title: "Summer sale".into(),
            image_url: Some(" ".into()),
            ..Default::default()
        };
        let err = BannerPayload::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::Required("imageUrl")));
        assert_eq!(err.field().as_deref(), Some("imageUrl"));
    }

    #[test]
    fn bad_link_is_reported_on_link_field() {
        let form = BannerForm {
            title: "Summer sale".into(),
            image_url: Some("/uploads/sale.png".into()),
            link_url: Some("not a link".into()),
            ..Default::default()
        };
        let err = BannerPayload::try_from(form).unwrap_err();
        assert_eq!(err.field().as_deref(), Some("linkUrl"));
    }

    #[test]
    fn defaults_position_and_status() {
        let form = BannerForm {
            title: "Summer sale".into(),
            image_url: Some("/uploads/sale.webp".into()),
            link_url: Some("https://shop.example.com/sale".into()),
            ..Default::default()
        };
        let payload = BannerPayload::try_from(form).unwrap();
        assert_eq!(payload.position, 0);
        assert_eq!(payload.status, EntityStatus::Active);
        assert_eq!(payload.image_url.as_str(), "/uploads/sale.webp");
    }

    #[test]
    fn negative_position_is_rejected() {
        let form = BannerForm {
            title: "Summer sale".into(),
            image_url: Some("/uploads/sale.webp".into()),
            position: Some("-2".into()),
            ..Default::default()
        };
        assert!(matches!(
            BannerPayload::try_from(form),
            Err(FormError::InvalidPosition)
        ));
    }
}
