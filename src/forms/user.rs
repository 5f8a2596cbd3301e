use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::types::{
    BusinessId, Email, EntityStatus, PersonName, PhoneNumber, UserRole, WebUrl,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::forms::{FormError, non_blank, optional_field};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Create/edit form of a dashboard user.
pub struct UserForm {
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub account_status: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserForm {
    fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            role: non_blank(self.role),
            account_status: non_blank(self.account_status),
            avatar_url: non_blank(self.avatar_url),
        }
    }
}

/// Validated user fields.
#[derive(Clone, Debug, PartialEq)]
pub struct UserPayload {
    pub full_name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub account_status: EntityStatus,
    pub avatar_url: Option<WebUrl>,
}

impl TryFrom<UserForm> for UserPayload {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        Ok(Self {
            full_name: PersonName::new(form.full_name).map_err(|_| FormError::InvalidText("fullName"))?,
            email: Email::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: optional_field(form.phone, PhoneNumber::new, FormError::InvalidPhoneNumber)?,
            role: optional_field(form.role, |r| r.parse::<UserRole>(), FormError::InvalidRole)?
                .unwrap_or_default(),
            account_status: optional_field(
                form.account_status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
            avatar_url: optional_field(
                form.avatar_url,
                WebUrl::new,
                FormError::InvalidUrl("avatarUrl"),
            )?,
        })
    }
}

impl UserPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewUser {
        NewUser {
            business_id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            account_status: self.account_status,
            avatar_url: self.avatar_url,
        }
    }

    /// Account status is changed through the status toggle only.
    pub fn into_update(self) -> UpdateUser {
        UpdateUser {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            avatar_url: self.avatar_url,
        }
    }
}

impl DraftForm for UserForm {
    type Record = User;
    type Payload = UserPayload;
    const FIELDS: &'static [&'static str] = &[
        "fullName",
        "email",
        "phone",
        "role",
        "accountStatus",
        "avatarUrl",
    ];

    fn from_record(user: &User) -> Self {
        Self {
            full_name: user.full_name.to_string(),
            email: user.email.to_string(),
            phone: user.phone.as_ref().map(ToString::to_string),
            role: Some(user.role.to_string()),
            account_status: Some(user.account_status.to_string()),
            avatar_url: user.avatar_url.as_ref().map(ToString::to_string),
        }
    }

    fn into_payload(self) -> Result<UserPayload, FormError> {
        UserPayload::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            full_name: "  Ada Lovelace ".into(),
            email: " ADA@example.com ".into(),
            phone: Some("   ".into()),
            role: Some("manager".into()),
            account_status: None,
            avatar_url: Some(String::new()),
        }
    }

    #[test]
    fn payload_trims_and_strips_blank_optionals() {
        let payload = UserPayload::try_from(form()).unwrap();
        assert_eq!(payload.full_name.as_str(), "Ada Lovelace");
        assert_eq!(payload.email.as_str(), "ada@example.com");
        assert_eq!(payload.phone, None);
        assert_eq!(payload.avatar_url, None);
        assert_eq!(payload.role, UserRole::Manager);
        assert_eq!(payload.account_status, EntityStatus::Active);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut form = form();
        form.full_name = "   ".into();
        let err = UserPayload::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert!(err.field().is_some());
    }

    #[test]
    fn name_is_reported_before_email() {
        let mut form = form();
        form.full_name = String::new();
        form.email = "nobody".into();
        let err = UserPayload::try_from(form).unwrap_err();
        assert_eq!(err.field_in(UserForm::FIELDS).as_deref(), Some("fullName"));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut form = form();
        form.email = "nobody".into();
        assert!(UserPayload::try_from(form).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut form = form();
        form.role = Some("owner".into());
        assert!(matches!(
            UserPayload::try_from(form),
            Err(FormError::InvalidRole)
        ));
    }

    #[test]
    fn deserializes_camel_case_json() {
        let form: UserForm = serde_json::from_str(
            r#"{"fullName": "Grace", "email": "grace@example.com", "accountStatus": "INACTIVE"}"#,
        )
        .unwrap();
        let payload = UserPayload::try_from(form).unwrap();
        assert_eq!(payload.account_status, EntityStatus::Inactive);
    }
}
