//! Form definitions backing the dashboard mutation modals and JSON API.
//!
//! Every form is deserializable from both `application/x-www-form-urlencoded`
//! bodies and JSON, is checked with `validator` first and is then converted
//! into a typed payload. The conversion trims strings and turns blank
//! optional fields into `None`.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

pub mod address;
pub mod banner;
pub mod brand;
pub mod business;
pub mod category;
pub mod product;
pub mod status;
pub mod upload;
pub mod user;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
///
/// Variants that can come from several inputs carry the camelCase name of
/// the offending field.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid {0}")]
    InvalidText(&'static str),

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid url in {0}")]
    InvalidUrl(&'static str),

    #[error("invalid price")]
    InvalidPrice,

    #[error("discount must be between 0 and 100")]
    InvalidDiscount,

    #[error("invalid stock quantity")]
    InvalidStock,

    #[error("invalid position")]
    InvalidPosition,

    #[error("invalid {0}")]
    InvalidCoordinates(&'static str),

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid role")]
    InvalidRole,

    #[error("invalid currency code")]
    InvalidCurrency,

    #[error("invalid {0}")]
    InvalidId(&'static str),

    /// Rejected upload; surfaced as a toast, not next to a field.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

impl FormError {
    /// Name of the field the error should be reported next to.
    ///
    /// Validation failures on several fields report the alphabetically first
    /// one; use [`FormError::field_in`] to follow the form's layout instead.
    pub fn field(&self) -> Option<String> {
        self.field_in(&[])
    }

    /// Like [`FormError::field`], but a validation failure reports the first
    /// failing field of `order`.
    pub fn field_in(&self, order: &[&str]) -> Option<String> {
        let field = match self {
            FormError::Validation(errors) => {
                let field_errors = errors.field_errors();
                let mut failing: Vec<String> =
                    field_errors.keys().map(|key| camel_case(key)).collect();
                failing.sort_unstable();
                return order
                    .iter()
                    .find(|name| failing.iter().any(|field| field == *name))
                    .map(|name| name.to_string())
                    .or_else(|| failing.into_iter().next());
            }
            FormError::Required(field)
            | FormError::InvalidText(field)
            | FormError::InvalidUrl(field)
            | FormError::InvalidCoordinates(field)
            | FormError::InvalidId(field) => field,
            FormError::InvalidEmail => "email",
            FormError::InvalidPhoneNumber => "phone",
            FormError::InvalidPrice => "price",
            FormError::InvalidDiscount => "discountPercent",
            FormError::InvalidStock => "stock",
            FormError::InvalidPosition => "position",
            FormError::InvalidStatus => "status",
            FormError::InvalidRole => "role",
            FormError::InvalidCurrency => "currency",
            FormError::InvalidImage(_) => return None,
        };
        Some(field.to_string())
    }
}

/// `full_name` -> `fullName`; names already in camelCase pass through.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Trims the value and drops it when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Converts an optional raw field, mapping any failure to `error`.
pub(crate) fn optional_field<T, E>(
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, E>,
    error: FormError,
) -> Result<Option<T>, FormError> {
    match non_blank(value) {
        Some(value) => parse(value).map(Some).map_err(|_| error),
        None => Ok(None),
    }
}

/// Interprets checkbox and JSON boolean values.
pub(crate) fn flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Deserializes strings, numbers and booleans into an optional string so
/// HTML forms and JSON clients can send numeric fields either way.
pub(crate) fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
            Scalar::Text(text) => text,
            Scalar::Int(number) => number.to_string(),
            Scalar::Float(number) => number.to_string(),
            Scalar::Bool(flag) => flag.to_string(),
        }),
    )
}
