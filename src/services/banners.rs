//! Storefront banner workflows.

use crate::SERVICE_ACCESS_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::banner::Banner;
use crate::domain::types::{BannerId, EntityStatus};
use crate::forms::banner::BannerPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{BannerReader, BannerWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

/// Loads one page of banners matching the filters, ordered by position.
pub fn list_banners<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<Banner>>
where
    R: BannerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (total, banners) = repo
        .list_banners(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list banners: {err}");
            err
        })?;

    Ok(ListPage::new(
        banners,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_banner<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Banner>
where
    R: BannerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_banner_by_id(BannerId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the input and persists a new banner.
pub fn create_banner<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    input: F,
) -> ServiceResult<Banner>
where
    R: BannerWriter + ?Sized,
    F: TryInto<BannerPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let banner = repo
        .create_banner(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create banner: {err}");
            err
        })?;

    Ok(banner)
}

pub fn update_banner<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<Banner>
where
    R: BannerWriter + ?Sized,
    F: TryInto<BannerPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let banner = repo
        .update_banner(BannerId::new(id)?, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update banner {id}: {err}");
            err
        })?;

    Ok(banner)
}

pub fn set_banner_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<Banner>
where
    R: BannerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let banner = repo
        .set_banner_status(BannerId::new(id)?, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of banner {id}: {err}");
            err
        })?;

    Ok(banner)
}

pub fn delete_banner<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: BannerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    if repo.delete_banner(BannerId::new(id)?, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Renders every banner matching the filters as CSV.
pub fn export_banners<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: BannerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (_, banners) = repo.list_banners(&filter_query(business_id, params))?;

    to_csv(&banners)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{BannerTitle, BusinessId, WebUrl};
    use crate::forms::banner::BannerForm;
    use crate::pagination::PageSize;
    use crate::repository::mock::MockRepository;

    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@example.com".to_string(),
            business_id: 42,
            name: "Staff".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn banner(id: i32, status: EntityStatus) -> Banner {
        let now = Utc::now().naive_utc();
        Banner {
            id: BannerId::new(id).unwrap(),
            business_id: BusinessId::new(42).unwrap(),
            title: BannerTitle::new("Summer sale").unwrap(),
            subtitle: None,
            image_url: WebUrl::new("/uploads/summer.png").unwrap(),
            link_url: None,
            position: 0,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn banner_without_image_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_banner().times(0);
        let form = BannerForm {
            title: "Summer sale".to_string(),
            ..BannerForm::default()
        };

        let result = create_banner(&repo, &staff_user(), form);

        assert!(matches!(result, Err(ServiceError::Form(message)) if message.contains("image")));
    }

    #[test]
    fn status_filter_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_banners()
            .withf(|query| query.status == Some(EntityStatus::Inactive))
            .times(1)
            .returning(|_| Ok((1, vec![banner(1, EntityStatus::Inactive)])));
        let params = FetchParams {
            search: None,
            status: Some(EntityStatus::Inactive),
            page_no: 1,
            page_size: PageSize::default(),
        };

        let page = list_banners(&repo, &staff_user(), &params).unwrap();

        assert_eq!(page.content[0].status, EntityStatus::Inactive);
    }

    #[test]
    fn disabling_returns_updated_banner() {
        let mut repo = MockRepository::new();
        repo.expect_set_banner_status()
            .withf(|id, business_id, status| {
                id.get() == 5 && business_id.get() == 42 && *status == EntityStatus::Inactive
            })
            .times(1)
            .returning(|_, _, status| Ok(banner(5, status)));

        let updated = set_banner_status(&repo, &staff_user(), 5, EntityStatus::Inactive).unwrap();

        assert_eq!(updated.status, EntityStatus::Inactive);
    }

    #[test]
    fn get_of_missing_banner_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_banner_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = get_banner(&repo, &staff_user(), 77);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
