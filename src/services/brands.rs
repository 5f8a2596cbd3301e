//! Brand catalogue workflows.

use crate::SERVICE_ACCESS_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::brand::Brand;
use crate::domain::types::{BrandId, EntityStatus};
use crate::forms::brand::BrandPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{BrandReader, BrandWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

/// Loads one page of brands matching the filters.
pub fn list_brands<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<Brand>>
where
    R: BrandReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (total, brands) = repo
        .list_brands(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list brands: {err}");
            err
        })?;

    Ok(ListPage::new(
        brands,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_brand<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Brand>
where
    R: BrandReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_brand_by_id(BrandId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the input and persists a new brand.
pub fn create_brand<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    input: F,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
    F: TryInto<BrandPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let brand = repo
        .create_brand(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create brand: {err}");
            err
        })?;

    Ok(brand)
}

pub fn update_brand<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
    F: TryInto<BrandPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let brand = repo
        .update_brand(BrandId::new(id)?, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update brand {id}: {err}");
            err
        })?;

    Ok(brand)
}

pub fn set_brand_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let brand = repo
        .set_brand_status(BrandId::new(id)?, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of brand {id}: {err}");
            err
        })?;

    Ok(brand)
}

pub fn delete_brand<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: BrandWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    if repo.delete_brand(BrandId::new(id)?, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Renders every brand matching the filters as CSV.
pub fn export_brands<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: BrandReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (_, brands) = repo.list_brands(&filter_query(business_id, params))?;

    to_csv(&brands)
}
