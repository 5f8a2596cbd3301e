//! Diesel models for catalogue products.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{
    BrandId, BusinessId, CategoryId, Description, DiscountPercent, Price, ProductId, ProductName,
    Sku, TypeConstraintError, WebUrl,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub business_id: i32,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub discount_percent: Option<i32>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Product row joined with the names of its category and brand.
pub type ProductRow = (Product, Option<String>, Option<String>);

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub business_id: i32,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub name: &'a str,
    pub sku: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: i64,
    pub discount_percent: Option<i32>,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub name: &'a str,
    pub sku: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: i64,
    pub discount_percent: Option<i32>,
    pub stock: i32,
    pub image_url: Option<&'a str>,
}

/// Converts a joined row into the domain product.
pub fn into_domain(row: ProductRow) -> Result<DomainProduct, TypeConstraintError> {
    let (product, category_name, brand_name) = row;
    Ok(DomainProduct {
        id: ProductId::new(product.id)?,
        business_id: BusinessId::new(product.business_id)?,
        category_id: product.category_id.map(CategoryId::new).transpose()?,
        category_name,
        brand_id: product.brand_id.map(BrandId::new).transpose()?,
        brand_name,
        name: ProductName::new(product.name)?,
        sku: optional(product.sku, Sku::new)?,
        description: optional(product.description, Description::new)?,
        price: Price::new(product.price)?,
        discount_percent: product.discount_percent.map(DiscountPercent::new).transpose()?,
        stock: product.stock,
        image_url: optional(product.image_url, WebUrl::new)?,
        status: product.status.parse()?,
        created_at: product.created_at,
        updated_at: product.updated_at,
    })
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            business_id: product.business_id.get(),
            category_id: product.category_id.map(CategoryId::get),
            brand_id: product.brand_id.map(BrandId::get),
            name: product.name.as_str(),
            sku: product.sku.as_ref().map(Sku::as_str),
            description: product.description.as_ref().map(Description::as_str),
            price: product.price.minor_units(),
            discount_percent: product.discount_percent.map(|d| i32::from(d.get())),
            stock: product.stock,
            image_url: product.image_url.as_ref().map(WebUrl::as_str),
            status: product.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(product: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: product.category_id.map(CategoryId::get),
            brand_id: product.brand_id.map(BrandId::get),
            name: product.name.as_str(),
            sku: product.sku.as_ref().map(Sku::as_str),
            description: product.description.as_ref().map(Description::as_str),
            price: product.price.minor_units(),
            discount_percent: product.discount_percent.map(|d| i32::from(d.get())),
            stock: product.stock,
            image_url: product.image_url.as_ref().map(WebUrl::as_str),
        }
    }
}
