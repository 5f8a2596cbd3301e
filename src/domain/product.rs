//! Catalogue products.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BrandId, BusinessId, CategoryId, Description, DiscountPercent, EntityStatus, Price, ProductId,
    ProductName, Sku, WebUrl,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub business_id: BusinessId,
    pub category_id: Option<CategoryId>,
    /// Denormalized from the category at read time.
    pub category_name: Option<String>,
    pub brand_id: Option<BrandId>,
    /// Denormalized from the brand at read time.
    pub brand_name: Option<String>,
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<Description>,
    pub price: Price,
    pub discount_percent: Option<DiscountPercent>,
    pub stock: i32,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub business_id: BusinessId,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<Description>,
    pub price: Price,
    pub discount_percent: Option<DiscountPercent>,
    pub stock: i32,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProduct {
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<Description>,
    pub price: Price,
    pub discount_percent: Option<DiscountPercent>,
    pub stock: i32,
    pub image_url: Option<WebUrl>,
}
