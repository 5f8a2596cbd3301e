use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controller::modal::DraftForm;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{
    BrandId, BusinessId, CategoryId, Description, DiscountPercent, EntityStatus, Price,
    ProductName, Sku, TypeConstraintError, WebUrl,
};
use crate::forms::{FormError, non_blank, optional_field, scalar};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Decimal amount, e.g. `19.99`.
    #[serde(default, deserialize_with = "scalar")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub discount_percent: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub stock: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ProductForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            sku: non_blank(self.sku),
            description: non_blank(self.description),
            price: non_blank(self.price),
            discount_percent: non_blank(self.discount_percent),
            stock: non_blank(self.stock),
            category_id: non_blank(self.category_id),
            brand_id: non_blank(self.brand_id),
            image_url: non_blank(self.image_url),
            status: non_blank(self.status),
        }
    }
}

fn parse_id<T>(
    raw: String,
    make: fn(i32) -> Result<T, TypeConstraintError>,
    field: &'static str,
) -> Result<T, FormError> {
    raw.parse::<i32>()
        .ok()
        .and_then(|id| make(id).ok())
        .ok_or(FormError::InvalidId(field))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductPayload {
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<Description>,
    pub price: Price,
    pub discount_percent: Option<DiscountPercent>,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub image_url: Option<WebUrl>,
    pub status: EntityStatus,
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        let price = form
            .price
            .ok_or(FormError::InvalidPrice)?
            .parse::<Price>()
            .map_err(|_| FormError::InvalidPrice)?;

        let discount_percent = optional_field(
            form.discount_percent,
            |raw| {
                raw.parse::<i32>()
                    .ok()
                    .and_then(|value| DiscountPercent::new(value).ok())
                    .ok_or(())
            },
            FormError::InvalidDiscount,
        )?;

        let stock = optional_field(
            form.stock,
            |raw| raw.parse::<i32>().ok().filter(|s| *s >= 0).ok_or(()),
            FormError::InvalidStock,
        )?
        .unwrap_or(0);

        Ok(Self {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidText("name"))?,
            sku: optional_field(form.sku, Sku::new, FormError::InvalidText("sku"))?,
            description: optional_field(
                form.description,
                Description::new,
                FormError::InvalidText("description"),
            )?,
            price,
            discount_percent,
            stock,
            category_id: form
                .category_id
                .map(|raw| parse_id(raw, CategoryId::new, "categoryId"))
                .transpose()?,
            brand_id: form
                .brand_id
                .map(|raw| parse_id(raw, BrandId::new, "brandId"))
                .transpose()?,
            image_url: optional_field(
                form.image_url,
                WebUrl::new,
                FormError::InvalidUrl("imageUrl"),
            )?,
            status: optional_field(
                form.status,
                |s| s.parse::<EntityStatus>(),
                FormError::InvalidStatus,
            )?
            .unwrap_or_default(),
        })
    }
}

impl ProductPayload {
    pub fn into_new(self, business_id: BusinessId) -> NewProduct {
        NewProduct {
            business_id,
            category_id: self.category_id,
            brand_id: self.brand_id,
            name: self.name,
            sku: self.sku,
            description: self.description,
            price: self.price,
            discount_percent: self.discount_percent,
            stock: self.stock,
            image_url: self.image_url,
            status: self.status,
        }
    }

    pub fn into_update(self) -> UpdateProduct {
        UpdateProduct {
            category_id: self.category_id,
            brand_id: self.brand_id,
            name: self.name,
            sku: self.sku,
            description: self.description,
            price: self.price,
            discount_percent: self.discount_percent,
            stock: self.stock,
            image_url: self.image_url,
        }
    }
}

impl DraftForm for ProductForm {
    type Record = Product;
    type Payload = ProductPayload;
    const FIELDS: &'static [&'static str] = &[
        "name",
        "sku",
        "description",
        "price",
        "discountPercent",
        "stock",
        "categoryId",
        "brandId",
        "imageUrl",
        "status",
    ];

    fn from_record(product: &Product) -> Self {
        Self {
            name: product.name.to_string(),
            sku: product.sku.as_ref().map(ToString::to_string),
            description: product.description.as_ref().map(ToString::to_string),
            price: Some(product.price.to_string()),
            discount_percent: product.discount_percent.map(|d| d.get().to_string()),
            stock: Some(product.stock.to_string()),
            category_id: product.category_id.map(|id| id.to_string()),
            brand_id: product.brand_id.map(|id| id.to_string()),
            image_url: product.image_url.as_ref().map(ToString::to_string),
            status: Some(product.status.to_string()),
        }
    }

    fn into_payload(self) -> Result<ProductPayload, FormError> {
        ProductPayload::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: " Espresso cup ".into(),
            price: Some("12.50".into()),
            discount_percent: Some("15".into()),
            stock: Some("3".into()),
            category_id: Some("2".into()),
            brand_id: Some("".into()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_money_and_ids() {
        let payload = ProductPayload::try_from(form()).unwrap();
        assert_eq!(payload.price.minor_units(), 1250);
        assert_eq!(payload.discount_percent.map(DiscountPercent::get), Some(15));
        assert_eq!(payload.stock, 3);
        assert_eq!(payload.category_id.map(CategoryId::get), Some(2));
        assert_eq!(payload.brand_id, None);
    }

    #[test]
    fn price_is_required() {
        let mut form = form();
        form.price = Some("  ".into());
        assert!(matches!(
            ProductPayload::try_from(form),
            Err(FormError::InvalidPrice)
        ));
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        let mut form = form();
        form.discount_percent = Some("120".into());
        let err = ProductPayload::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::InvalidDiscount));
        assert_eq!(err.field().as_deref(), Some("discountPercent"));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut form = form();
        form.stock = Some("-1".into());
        assert!(matches!(
            ProductPayload::try_from(form),
            Err(FormError::InvalidStock)
        ));
    }

    #[test]
    fn json_numbers_are_accepted() {
        let form: ProductForm = serde_json::from_str(
            r#"{"name": "Mug", "price": 9.5, "stock": 10, "categoryId": 4, "discountPercent": null}"#,
        )
        .unwrap();
        let payload = ProductPayload::try_from(form).unwrap();
        assert_eq!(payload.price.minor_units(), 950);
        assert_eq!(payload.stock, 10);
        assert_eq!(payload.category_id.map(CategoryId::get), Some(4));
        assert_eq!(payload.discount_percent, None);
    }
}
