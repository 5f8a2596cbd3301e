//! Product catalogue workflows.

use crate::SERVICE_ACCESS_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::{BusinessId, EntityStatus, ProductId};
use crate::forms::product::ProductPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{BrandReader, CategoryReader, ListQuery, ProductReader, ProductWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

/// Loads one page of products matching the filters. Products come with the
/// names of their category and brand.
pub fn list_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<Product>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (total, products) = repo
        .list_products(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list products: {err}");
            err
        })?;

    Ok(ListPage::new(
        products,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_product<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_product_by_id(ProductId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Active categories and brands offered by the product modal pickers.
pub fn load_reference_options<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<(Vec<Category>, Vec<Brand>)>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let query = ListQuery::new(business_of(user)?).status(EntityStatus::Active);

    let (_, categories) = repo.list_categories(&query)?;
    let (_, brands) = repo.list_brands(&query)?;

    Ok((categories, brands))
}

/// Rejects category and brand references that point outside the business.
fn check_references<R>(
    repo: &R,
    business_id: BusinessId,
    payload: &ProductPayload,
) -> ServiceResult<()>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    if let Some(category_id) = payload.category_id
        && repo.get_category_by_id(category_id, business_id)?.is_none()
    {
        return Err(ServiceError::Form("Unknown category".to_string()));
    }

    if let Some(brand_id) = payload.brand_id
        && repo.get_brand_by_id(brand_id, business_id)?.is_none()
    {
        return Err(ServiceError::Form("Unknown brand".to_string()));
    }

    Ok(())
}

pub fn create_product<R, F>(repo: &R, user: &AuthenticatedUser, input: F) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + BrandReader + ?Sized,
    F: TryInto<ProductPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    check_references(repo, business_id, &payload)?;

    let product = repo
        .create_product(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create product: {err}");
            err
        })?;

    Ok(product)
}

pub fn update_product<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + BrandReader + ?Sized,
    F: TryInto<ProductPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    check_references(repo, business_id, &payload)?;

    let product = repo
        .update_product(ProductId::new(id)?, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update product {id}: {err}");
            err
        })?;

    Ok(product)
}

pub fn set_product_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let product = repo
        .set_product_status(ProductId::new(id)?, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of product {id}: {err}");
            err
        })?;

    Ok(product)
}

pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    if repo.delete_product(ProductId::new(id)?, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

pub fn export_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let business_id = business_of(user)?;

    let (_, products) = repo.list_products(&filter_query(business_id, params))?;

    to_csv(&products)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{CategoryId, CategoryName, Price, ProductName};
    use crate::forms::product::ProductForm;
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

    fn product(id: i32) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: ProductId::new(id).unwrap(),
            business_id: BusinessId::new(42).unwrap(),
            category_id: Some(CategoryId::new(3).unwrap()),
            category_name: Some("Mugs".to_string()),
            brand_id: None,
            brand_name: None,
            name: ProductName::new("Blue mug").unwrap(),
            sku: None,
            description: None,
            price: Price::new(1250).unwrap(),
            discount_percent: None,
            stock: 4,
            image_url: None,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn category() -> Category {
        let now = Utc::now().naive_utc();
        Category {
            id: CategoryId::new(3).unwrap(),
            business_id: BusinessId::new(42).unwrap(),
            name: CategoryName::new("Mugs").unwrap(),
            description: None,
            image_url: None,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "Blue mug".to_string(),
            price: Some("12.50".to_string()),
            stock: Some("4".to_string()),
            category_id: Some("3".to_string()),
            ..ProductForm::default()
        }
    }

    #[test]
    fn missing_price_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);
        let form = ProductForm {
            price: None,
            ..form()
        };

        let result = create_product(&repo, &staff_user(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn category_of_another_business_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .withf(|id, business_id| id.get() == 3 && business_id.get() == 42)
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_product().times(0);

        let result = create_product(&repo, &staff_user(), form());

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "Unknown category"));
    }

    #[test]
    fn create_converts_price_to_minor_units() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .times(1)
            .returning(|_, _| Ok(Some(category())));
        repo.expect_create_product()
            .withf(|new| new.price.minor_units() == 1250 && new.stock == 4)
            .times(1)
            .returning(|_| Ok(product(1)));

        let created = create_product(&repo, &staff_user(), form()).unwrap();

        assert_eq!(created.category_name.as_deref(), Some("Mugs"));
    }

    #[test]
    fn update_checks_brand_reference() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id()
            .times(1)
            .returning(|_, _| Ok(Some(category())));
        repo.expect_get_brand_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_update_product().times(0);
        let form = ProductForm {
            brand_id: Some("11".to_string()),
            ..form()
        };

        let result = update_product(&repo, &staff_user(), 1, form);

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "Unknown brand"));
    }

    #[test]
    fn export_ignores_pagination() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.pagination.is_none())
            .times(1)
            .returning(|_| Ok((2, vec![product(1), product(2)])));
        let params = FetchParams {
            search: None,
            status: None,
            page_no: 3,
            page_size: Default::default(),
        };

        let csv = export_products(&repo, &staff_user(), &params).unwrap();
        let text = String::from_utf8(csv).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Blue mug"));
    }
}
