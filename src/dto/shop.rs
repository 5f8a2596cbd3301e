use serde::Serialize;

use crate::domain::banner::Banner;
use crate::domain::business::BusinessProfile;
use crate::domain::pricing::DisplayPrice;
use crate::domain::product::Product;
use crate::pagination::ListPage;

/// Product card of the public shop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProduct {
    pub product: Product,
    pub price: DisplayPrice,
    /// Price to pay, formatted as `x.yy`.
    pub final_label: String,
    /// Crossed-out list price, present only during a promotion.
    pub list_label: Option<String>,
}

impl From<Product> for ShopProduct {
    fn from(product: Product) -> Self {
        let price = product.display_price();
        Self {
            final_label: price.final_price.to_string(),
            list_label: price
                .has_promotion()
                .then(|| price.list_price.to_string()),
            price,
            product,
        }
    }
}

/// Data required to render the public shop page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPageData {
    pub business_id: i32,
    pub profile: Option<BusinessProfile>,
    pub banners: Vec<Banner>,
    pub products: ListPage<ShopProduct>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProductData {
    pub business_id: i32,
    pub profile: Option<BusinessProfile>,
    pub item: ShopProduct,
}
