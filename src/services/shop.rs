//! Public storefront pages. No sign-in is required; only active records
//! are ever exposed.

use crate::controller::state::FetchParams;
use crate::domain::types::{BusinessId, EntityStatus, ProductId};
use crate::dto::shop::{ShopPageData, ShopProduct, ShopProductData};
use crate::pagination::ListPage;
use crate::repository::{BannerReader, BusinessReader, ListQuery, ProductReader};
use crate::services::{ServiceError, ServiceResult, page_query};

/// Banners shown above the product grid.
const SHOP_BANNER_LIMIT: usize = 5;

fn shop_business(business_id: i32) -> ServiceResult<BusinessId> {
    BusinessId::new(business_id).map_err(|_| ServiceError::NotFound)
}

/// Loads one page of active products together with the active banners.
pub fn load_shop_page<R>(
    repo: &R,
    business_id: i32,
    params: &FetchParams,
) -> ServiceResult<ShopPageData>
where
    R: ProductReader + BannerReader + BusinessReader + ?Sized,
{
    let business = shop_business(business_id)?;

    let params = FetchParams {
        status: Some(EntityStatus::Active),
        ..params.clone()
    };

    let (total, products) = repo.list_products(&page_query(business, &params)).map_err(|err| {
        log::error!("Failed to list shop products: {err}");
        err
    })?;

    let (_, banners) = repo.list_banners(
        &ListQuery::new(business)
            .status(EntityStatus::Active)
            .paginate(1, SHOP_BANNER_LIMIT),
    )?;

    let profile = repo.get_business_profile(business)?;

    Ok(ShopPageData {
        business_id,
        profile,
        banners,
        products: ListPage::new(products, params.page_no, params.page_size.get(), total)
            .map(ShopProduct::from),
    })
}

/// Loads a single active product.
pub fn load_shop_product<R>(
    repo: &R,
    business_id: i32,
    product_id: i32,
) -> ServiceResult<ShopProductData>
where
    R: ProductReader + BusinessReader + ?Sized,
{
    let business = shop_business(business_id)?;
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    let product = repo
        .get_product_by_id(product_id, business)?
        .filter(|product| product.status.is_active())
        .ok_or(ServiceError::NotFound)?;

    let profile = repo.get_business_profile(business)?;

    Ok(ShopProductData {
        business_id,
        profile,
        item: ShopProduct::from(product),
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::product::Product;
    use crate::domain::types::{DiscountPercent, Price, ProductName};
    use crate::pagination::PageSize;
    use crate::repository::mock::MockRepository;

    fn product(status: EntityStatus) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: ProductId::new(1).unwrap(),
            business_id: BusinessId::new(3).unwrap(),
            category_id: None,
            category_name: None,
            brand_id: None,
            brand_name: None,
            name: ProductName::new("Teapot").unwrap(),
            sku: None,
            description: None,
            price: Price::new(2000).unwrap(),
            discount_percent: Some(DiscountPercent::new(10).unwrap()),
            stock: 1,
            image_url: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn shop_lists_only_active_products_with_prices() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query.status == Some(EntityStatus::Active) && query.business_id.get() == 3
            })
            .times(1)
            .returning(|_| Ok((1, vec![product(EntityStatus::Active)])));
        repo.expect_list_banners()
            .withf(|query| query.status == Some(EntityStatus::Active))
            .times(1)
            .returning(|_| Ok((0, vec![])));
        repo.expect_get_business_profile()
            .times(1)
            .returning(|_| Ok(None));
        let params = FetchParams {
            search: None,
            status: Some(EntityStatus::Inactive),
            page_no: 1,
            page_size: PageSize::default(),
        };

        let data = load_shop_page(&repo, 3, &params).unwrap();

        let item = &data.products.content[0];
        assert_eq!(item.price.final_price, Price::new(1800).unwrap());
        assert_eq!(item.price.savings, Price::new(200).unwrap());
    }

    #[test]
    fn inactive_product_is_hidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id()
            .times(1)
            .returning(|_, _| Ok(Some(product(EntityStatus::Inactive))));
        repo.expect_get_business_profile().times(0);

        let result = load_shop_product(&repo, 3, 1);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn invalid_business_id_is_not_found() {
        let repo = MockRepository::new();

        let result = load_shop_product(&repo, 0, 1);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
