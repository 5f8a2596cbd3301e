//! Business profile settings.

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::business::BusinessProfile;
use crate::forms::business::{BusinessProfileForm, BusinessProfilePayload};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BusinessReader, BusinessWriter};
use crate::services::{ServiceResult, business_of, ensure_role};

/// Loads the settings form, prefilled from the stored profile when one
/// exists.
pub fn load_business_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<(Option<BusinessProfile>, BusinessProfileForm)>
where
    R: BusinessReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;

    let profile = repo.get_business_profile(business_id)?;
    let form = profile
        .as_ref()
        .map(BusinessProfileForm::from)
        .unwrap_or_default();

    Ok((profile, form))
}

/// Validates and stores the profile, creating it on first save.
pub fn save_business_profile<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    input: F,
) -> ServiceResult<BusinessProfile>
where
    R: BusinessWriter + ?Sized,
    F: TryInto<BusinessProfilePayload>,
    crate::services::ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let profile = repo
        .save_business_profile(&payload.into_domain(business_id))
        .map_err(|err| {
            log::error!("Failed to save business profile: {err}");
            err
        })?;

    Ok(profile)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::SERVICE_ACCESS_ROLE;
    use crate::domain::types::{BusinessId, BusinessName, CurrencyCode};
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            business_id: 42,
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    #[test]
    fn settings_require_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_business_profile().times(0);
        let user = AuthenticatedUser {
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            ..admin_user()
        };

        let result = load_business_profile(&repo, &user);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn missing_profile_loads_blank_form() {
        let mut repo = MockRepository::new();
        repo.expect_get_business_profile()
            .withf(|business_id| business_id.get() == 42)
            .times(1)
            .returning(|_| Ok(None));

        let (profile, form) = load_business_profile(&repo, &admin_user()).unwrap();

        assert!(profile.is_none());
        assert_eq!(form, BusinessProfileForm::default());
    }

    #[test]
    fn save_stores_profile_for_users_business() {
        let mut repo = MockRepository::new();
        repo.expect_save_business_profile()
            .withf(|profile| {
                profile.business_id.get() == 42 && profile.currency.as_str() == "EUR"
            })
            .times(1)
            .returning(|profile| {
                Ok(BusinessProfile {
                    business_id: profile.business_id,
                    name: profile.name.clone(),
                    email: None,
                    phone: None,
                    website: None,
                    logo_url: None,
                    currency: profile.currency.clone(),
                    description: None,
                    updated_at: Utc::now().naive_utc(),
                })
            });
        let form = BusinessProfileForm {
            name: "Corner Shop".to_string(),
            currency: Some("eur".to_string()),
            ..BusinessProfileForm::default()
        };

        let saved = save_business_profile(&repo, &admin_user(), form).unwrap();

        assert_eq!(saved.business_id, BusinessId::new(42).unwrap());
        assert_eq!(saved.name, BusinessName::new("Corner Shop").unwrap());
        assert_ne!(saved.currency, CurrencyCode::default());
    }
}
