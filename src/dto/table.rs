//! Column descriptors and pre-rendered rows for the admin tables.

use serde::{Deserialize, Serialize};

use crate::controller::confirm::toggle_label;
use crate::domain::Record;
use crate::domain::address::Address;
use crate::domain::banner::Banner;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::EntityStatus;
use crate::domain::user::User;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is visible on narrow screens.
    pub default_visible: bool,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// One table row with its cells already formatted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableRow {
    pub id: i32,
    pub status: EntityStatus,
    /// Label of the status toggle button.
    pub toggle_label: &'static str,
    pub image_url: Option<String>,
    pub cells: Vec<String>,
}

/// Labelled read-only values shown together in the detail modal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailSection {
    pub title: &'static str,
    pub fields: Vec<(String, String)>,
}

impl DetailSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            fields: Vec::new(),
        }
    }

    fn field(mut self, label: &str, value: impl ToString) -> Self {
        self.fields.push((label.to_string(), value.to_string()));
        self
    }
}

/// How a record is shown in its admin table.
pub trait TableRecord: Record {
    fn columns() -> Vec<TableColumn>;

    fn cells(&self) -> Vec<String>;

    fn image_url(&self) -> Option<String> {
        None
    }

    /// Sections of the detail modal. Every column, hidden ones included.
    fn details(&self) -> Vec<DetailSection> {
        let overview = Self::columns()
            .into_iter()
            .zip(self.cells())
            .fold(DetailSection::new("Overview"), |section, (column, cell)| {
                section.field(&column.label, cell)
            });
        vec![overview]
    }

    fn to_row(&self) -> TableRow {
        TableRow {
            id: self.record_id(),
            status: self.status(),
            toggle_label: toggle_label(self.status()),
            image_url: self.image_url(),
            cells: self.cells(),
        }
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "—".to_string(), |v| v.to_string())
}

impl TableRecord for User {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("fullName", "Name"),
            TableColumn::new("email", "Email"),
            TableColumn::new("phone", "Phone").visible(false),
            TableColumn::new("role", "Role"),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.to_string(),
            self.email.to_string(),
            or_dash(self.phone.as_ref()),
            self.role.to_string(),
        ]
    }

    fn image_url(&self) -> Option<String> {
        self.avatar_url.as_ref().map(ToString::to_string)
    }
}

impl TableRecord for Product {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("sku", "SKU").visible(false),
            TableColumn::new("category", "Category"),
            TableColumn::new("brand", "Brand").visible(false),
            TableColumn::new("price", "Price"),
            TableColumn::new("stock", "Stock"),
        ]
    }

    fn cells(&self) -> Vec<String> {
        let shown = self.display_price();
        let price = if shown.has_promotion() {
            format!(
                "{} (-{}%, was {})",
                shown.final_price, shown.discount_percent, shown.list_price
            )
        } else {
            shown.list_price.to_string()
        };

        vec![
            self.name.to_string(),
            or_dash(self.sku.as_ref()),
            or_dash(self.category_name.as_ref()),
            or_dash(self.brand_name.as_ref()),
            price,
            self.stock.to_string(),
        ]
    }

    fn image_url(&self) -> Option<String> {
        self.image_url.as_ref().map(ToString::to_string)
    }

    fn details(&self) -> Vec<DetailSection> {
        let shown = self.display_price();
        let overview = DetailSection::new("Overview")
            .field("Name", &self.name)
            .field("SKU", or_dash(self.sku.as_ref()))
            .field("Category", or_dash(self.category_name.as_ref()))
            .field("Brand", or_dash(self.brand_name.as_ref()))
            .field("Stock", self.stock)
            .field("Description", or_dash(self.description.as_ref()));
        let mut pricing = DetailSection::new("Pricing").field("Price", shown.final_price);
        if shown.has_promotion() {
            pricing = pricing
                .field("List price", shown.list_price)
                .field("Discount", format!("{}%", shown.discount_percent))
                .field("Savings", shown.savings);
        }
        vec![overview, pricing]
    }
}

impl TableRecord for Category {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("description", "Description").visible(false),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.to_string(), or_dash(self.description.as_ref())]
    }

    fn image_url(&self) -> Option<String> {
        self.image_url.as_ref().map(ToString::to_string)
    }
}

impl TableRecord for Brand {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("description", "Description").visible(false),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.to_string(), or_dash(self.description.as_ref())]
    }

    fn image_url(&self) -> Option<String> {
        self.logo_url.as_ref().map(ToString::to_string)
    }
}

impl TableRecord for Banner {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("title", "Title"),
            TableColumn::new("linkUrl", "Link").visible(false),
            TableColumn::new("position", "Position"),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.to_string(),
            or_dash(self.link_url.as_ref()),
            self.position.to_string(),
        ]
    }

    fn image_url(&self) -> Option<String> {
        Some(self.image_url.to_string())
    }
}

impl TableRecord for Address {
    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("label", "Label"),
            TableColumn::new("street", "Street"),
            TableColumn::new("city", "City"),
            TableColumn::new("country", "Country").visible(false),
            TableColumn::new("isDefault", "Default"),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.label.to_string(),
            self.street.as_str().to_string(),
            self.city.as_str().to_string(),
            self.country.as_str().to_string(),
            if self.is_default { "Yes" } else { "No" }.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{
        BannerId, BannerTitle, BusinessId, DiscountPercent, Price, ProductId, ProductName, WebUrl,
    };

    #[test]
    fn cells_line_up_with_columns() {
        let now = Utc::now().naive_utc();
        let product = Product {
            id: ProductId::new(1).unwrap(),
            business_id: BusinessId::new(1).unwrap(),
            category_id: None,
            category_name: None,
            brand_id: None,
            brand_name: None,
            name: ProductName::new("Mug").unwrap(),
            sku: None,
            description: None,
            price: Price::new(1000).unwrap(),
            discount_percent: Some(DiscountPercent::new(25).unwrap()),
            stock: 3,
            image_url: None,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let row = product.to_row();

        assert_eq!(row.cells.len(), Product::columns().len());
        assert_eq!(row.cells[4], "7.50 (-25%, was 10.00)");
        assert_eq!(row.cells[2], "—");
        assert_eq!(row.toggle_label, "Disable");

        let details = product.details();
        let pricing = &details[1];
        assert_eq!(pricing.title, "Pricing");
        assert_eq!(
            pricing.fields,
            vec![
                ("Price".to_string(), "7.50".to_string()),
                ("List price".to_string(), "10.00".to_string()),
                ("Discount".to_string(), "25%".to_string()),
                ("Savings".to_string(), "2.50".to_string()),
            ]
        );
    }

    #[test]
    fn inactive_rows_offer_enable() {
        let now = Utc::now().naive_utc();
        let banner = Banner {
            id: BannerId::new(2).unwrap(),
            business_id: BusinessId::new(1).unwrap(),
            title: BannerTitle::new("Sale").unwrap(),
            subtitle: None,
            image_url: WebUrl::new("/uploads/sale.png").unwrap(),
            link_url: None,
            position: 1,
            status: EntityStatus::Inactive,
            created_at: now,
            updated_at: now,
        };

        let row = banner.to_row();

        assert_eq!(row.toggle_label, "Enable");
        assert_eq!(row.image_url.as_deref(), Some("/uploads/sale.png"));
        assert_eq!(row.cells.len(), Banner::columns().len());

        let details = banner.details();
        assert_eq!(details.len(), 1);
        assert_eq!(
            details[0].fields[1],
            ("Link".to_string(), "—".to_string())
        );
    }
}
