//! CSV export of list pages.

use crate::domain::address::Address;
use crate::domain::banner::Banner;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::services::{ServiceError, ServiceResult};

/// A record that can be written as one CSV row.
pub trait CsvRecord {
    const HEADERS: &'static [&'static str];

    fn csv_fields(&self) -> Vec<String>;
}

fn text<T: AsRef<str>>(value: Option<T>) -> String {
    value.map(|v| v.as_ref().to_string()).unwrap_or_default()
}

/// Serializes `rows` with a header line.
pub fn to_csv<T: CsvRecord>(rows: &[T]) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let write_err = |err: csv::Error| {
        log::error!("Failed to write CSV export: {err}");
        ServiceError::Internal(err.to_string())
    };

    writer.write_record(T::HEADERS).map_err(write_err)?;
    for row in rows {
        writer.write_record(row.csv_fields()).map_err(write_err)?;
    }

    writer.into_inner().map_err(|err| {
        log::error!("Failed to flush CSV export: {err}");
        ServiceError::Internal(err.to_string())
    })
}

impl CsvRecord for User {
    const HEADERS: &'static [&'static str] =
        &["id", "fullName", "email", "phone", "role", "accountStatus", "createdAt"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name.to_string(),
            self.email.to_string(),
            text(self.phone.as_ref().map(|p| p.as_str())),
            self.role.to_string(),
            self.account_status.to_string(),
            self.created_at.to_string(),
        ]
    }
}

impl CsvRecord for Product {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "sku",
        "category",
        "brand",
        "price",
        "discountPercent",
        "finalPrice",
        "stock",
        "status",
    ];

    fn csv_fields(&self) -> Vec<String> {
        let shown = self.display_price();
        vec![
            self.id.to_string(),
            self.name.to_string(),
            text(self.sku.as_ref().map(|s| s.as_str())),
            text(self.category_name.as_ref()),
            text(self.brand_name.as_ref()),
            self.price.to_string(),
            self.discount_percent
                .map(|d| d.get().to_string())
                .unwrap_or_default(),
            shown.final_price.to_string(),
            self.stock.to_string(),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Category {
    const HEADERS: &'static [&'static str] = &["id", "name", "description", "status"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.to_string(),
            text(self.description.as_ref().map(|d| d.as_str())),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Brand {
    const HEADERS: &'static [&'static str] = &["id", "name", "description", "logoUrl", "status"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.to_string(),
            text(self.description.as_ref().map(|d| d.as_str())),
            text(self.logo_url.as_ref().map(|u| u.as_str())),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Banner {
    const HEADERS: &'static [&'static str] =
        &["id", "title", "subtitle", "imageUrl", "linkUrl", "position", "status"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.to_string(),
            text(self.subtitle.as_ref().map(|s| s.as_str())),
            self.image_url.to_string(),
            text(self.link_url.as_ref().map(|u| u.as_str())),
            self.position.to_string(),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Address {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "label",
        "street",
        "city",
        "region",
        "postalCode",
        "country",
        "latitude",
        "longitude",
        "isDefault",
        "status",
    ];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.label.to_string(),
            self.street.as_str().to_string(),
            self.city.as_str().to_string(),
            text(self.region.as_ref().map(|r| r.as_str())),
            text(self.postal_code.as_ref().map(|p| p.as_str())),
            self.country.as_str().to_string(),
            self.location.latitude().to_string(),
            self.location.longitude().to_string(),
            self.is_default.to_string(),
            self.status.to_string(),
        ]
    }
}
