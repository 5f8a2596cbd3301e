//! Category catalogue workflows.

use crate::SERVICE_ACCESS_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::category::Category;
use crate::domain::types::{CategoryId, EntityStatus};
use crate::forms::category::CategoryPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

/// Loads one page of categories matching the filters.
pub fn list_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (total, categories) = repo
        .list_categories(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list categories: {err}");
            err
        })?;

    Ok(ListPage::new(
        categories,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_category<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_category_by_id(CategoryId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the input and persists a new category.
pub fn create_category<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    input: F,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
    F: TryInto<CategoryPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let category = repo
        .create_category(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create category: {err}");
            err
        })?;

    Ok(category)
}

pub fn update_category<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
    F: TryInto<CategoryPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let category = repo
        .update_category(CategoryId::new(id)?, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update category {id}: {err}");
            err
        })?;

    Ok(category)
}

pub fn set_category_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let category = repo
        .set_category_status(CategoryId::new(id)?, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of category {id}: {err}");
            err
        })?;

    Ok(category)
}

pub fn delete_category<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    if repo.delete_category(CategoryId::new(id)?, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Renders every category matching the filters as CSV.
pub fn export_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (_, categories) = repo.list_categories(&filter_query(business_id, params))?;

    to_csv(&categories)
}
