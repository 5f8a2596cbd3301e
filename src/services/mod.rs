//! Business workflows invoked by the HTML routes, the JSON API and the
//! list controller adapters.
//!
//! Every service takes the repository as a trait object bound and the
//! [`AuthenticatedUser`] performing the action, checks the role first and
//! scopes all data access to the user's business.

use std::convert::Infallible;

use thiserror::Error;

use crate::controller::state::FetchParams;
use crate::domain::types::{BusinessId, TypeConstraintError};
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ListQuery;
use crate::repository::errors::RepositoryError;

pub mod addresses;
pub mod banners;
pub mod brands;
pub mod business;
pub mod categories;
pub mod export;
pub mod products;
pub mod shop;
pub mod upload;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<Infallible> for ServiceError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

/// Returns `true` if `role` is present in `roles`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Fails with [`ServiceError::Unauthorized`] unless the user carries `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Business the user is acting for.
pub(crate) fn business_of(user: &AuthenticatedUser) -> ServiceResult<BusinessId> {
    Ok(BusinessId::new(user.business_id)?)
}

/// Repository query for one page of the user's business.
pub(crate) fn page_query(business_id: BusinessId, params: &FetchParams) -> ListQuery {
    filter_query(business_id, params).paginate(params.page_no, params.page_size.get())
}

/// Repository query for every record matching the filters, used by exports.
pub(crate) fn filter_query(business_id: BusinessId, params: &FetchParams) -> ListQuery {
    let mut query = ListQuery::new(business_id);
    if let Some(search) = &params.search {
        query = query.search(search.as_str());
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EntityStatus;
    use crate::pagination::PageSize;

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("email".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::DatabaseError("boom".into())),
            ServiceError::Repository(_)
        ));
    }

    #[test]
    fn page_query_carries_filters() {
        let params = FetchParams {
            search: Some(" mug ".into()),
            status: Some(EntityStatus::Inactive),
            page_no: 3,
            page_size: PageSize::or_default(Some(20)),
        };
        let query = page_query(BusinessId::new(4).unwrap(), &params);

        assert_eq!(query.search.as_deref(), Some("mug"));
        assert_eq!(query.status, Some(EntityStatus::Inactive));
        let pagination = query.pagination.unwrap();
        assert_eq!((pagination.page, pagination.per_page), (3, 20));
        assert!(filter_query(BusinessId::new(4).unwrap(), &params).pagination.is_none());
    }
}
