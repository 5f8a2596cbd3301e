//! Pickup and shipping address workflows.
//!
//! At most one address per business is the default; the repository clears
//! the previous default when another address claims it.

use crate::SERVICE_ACCESS_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::address::Address;
use crate::domain::types::{AddressId, EntityStatus};
use crate::forms::address::AddressPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{AddressReader, AddressWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

/// Loads one page of addresses matching the filters.
pub fn list_addresses<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<Address>>
where
    R: AddressReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (total, addresses) = repo
        .list_addresses(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list addresses: {err}");
            err
        })?;

    Ok(ListPage::new(
        addresses,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_address<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Address>
where
    R: AddressReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_address_by_id(AddressId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the input and persists a new address.
pub fn create_address<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    input: F,
) -> ServiceResult<Address>
where
    R: AddressWriter + ?Sized,
    F: TryInto<AddressPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let address = repo
        .create_address(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create address: {err}");
            err
        })?;

    Ok(address)
}

pub fn update_address<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<Address>
where
    R: AddressWriter + ?Sized,
    F: TryInto<AddressPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    let address = repo
        .update_address(AddressId::new(id)?, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update address {id}: {err}");
            err
        })?;

    Ok(address)
}

pub fn set_address_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<Address>
where
    R: AddressWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let address = repo
        .set_address_status(AddressId::new(id)?, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of address {id}: {err}");
            err
        })?;

    Ok(address)
}

pub fn delete_address<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: AddressWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    if repo.delete_address(AddressId::new(id)?, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Renders every address matching the filters as CSV.
pub fn export_addresses<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: AddressReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (_, addresses) = repo.list_addresses(&filter_query(business_id, params))?;

    to_csv(&addresses)
}
