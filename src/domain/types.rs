//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, coordinates within range) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Numeric value is outside the accepted range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// Unknown enum variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(BusinessId, "Unique identifier for a business (tenant).");
id_newtype!(UserId, "Unique identifier for a dashboard user.");
id_newtype!(ProductId, "Unique identifier for a product.");
id_newtype!(CategoryId, "Unique identifier for a category.");
id_newtype!(BrandId, "Unique identifier for a brand.");
id_newtype!(BannerId, "Unique identifier for a banner.");
id_newtype!(AddressId, "Unique identifier for an address.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(PersonName, "Full name of a dashboard user.");
non_empty_string_newtype!(ProductName, "Product title enforcing non-empty values.");
non_empty_string_newtype!(CategoryName, "Category name enforcing non-empty values.");
non_empty_string_newtype!(BrandName, "Brand name enforcing non-empty values.");
non_empty_string_newtype!(BannerTitle, "Banner headline enforcing non-empty values.");
non_empty_string_newtype!(AddressLabel, "Short label shown in the address picker.");
non_empty_string_newtype!(BusinessName, "Public business name.");
non_empty_string_newtype!(Sku, "Stock keeping unit code.");

/// Free text sanitized with `ammonia` so it is safe to render.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(String);

impl Description {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Absolute URL or site-relative path (`/uploads/...`) of an image or link.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WebUrl(String);

impl WebUrl {
    /// Ensures the trimmed value is a valid absolute URL or a rooted path.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;
        let raw = url.as_str();

        let is_local_path = raw.starts_with('/') && !raw.starts_with("//");
        if is_local_path || raw.validate_url() {
            Ok(Self(url.into_inner()))
        } else {
            Err(TypeConstraintError::InvalidUrl)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for WebUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Activation state shared by every managed entity.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

impl EntityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Inactive => "INACTIVE",
        }
    }

    /// Status the record ends up in after a toggle.
    pub const fn toggled(self) -> Self {
        match self {
            EntityStatus::Active => EntityStatus::Inactive,
            EntityStatus::Inactive => EntityStatus::Active,
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, EntityStatus::Active)
    }
}

impl Display for EntityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(EntityStatus::Active),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            _ => Err(TypeConstraintError::UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Role of a dashboard user inside a business.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Staff => "STAFF",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "MANAGER" => Ok(UserRole::Manager),
            "STAFF" => Ok(UserRole::Staff),
            _ => Err(TypeConstraintError::UnknownVariant {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Amount of money in minor currency units (cents).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Ten billion in major units.
    pub const MAX_MINOR_UNITS: i64 = 1_000_000_000_000;

    pub fn new(minor_units: i64) -> Result<Self, TypeConstraintError> {
        if !(0..=Self::MAX_MINOR_UNITS).contains(&minor_units) {
            return Err(TypeConstraintError::OutOfRange("price"));
        }
        Ok(Self(minor_units))
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = TypeConstraintError;

    /// Parses a decimal amount such as `19.99` or `5` into minor units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeConstraintError::InvalidValue(s.to_string());
        let trimmed = s.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|units| units.checked_add(cents))
            .ok_or(TypeConstraintError::OutOfRange("price"))
            .and_then(Price::new)
    }
}

/// Promotional discount in whole percent, `0..=100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(TypeConstraintError::OutOfRange("discount"))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Geographic coordinate pair picked on the address map.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TypeConstraintError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TypeConstraintError::OutOfRange("latitude"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TypeConstraintError::OutOfRange("longitude"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

/// ISO-4217 style three letter currency code, upper-cased.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = value.into().trim().to_ascii_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code))
        } else {
            Err(TypeConstraintError::InvalidValue(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert!(ProductId::new(1).is_ok());
        assert_eq!(ProductId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(BusinessId::new(-3), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = Email::new("  Admin@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "admin@example.com");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn names_reject_blank_input() {
        assert_eq!(ProductName::new("  Mug ").unwrap().as_str(), "Mug");
        assert_eq!(
            CategoryName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn description_strips_scripts() {
        let text = Description::new("Nice <script>alert(1)</script>cup").unwrap();
        assert_eq!(text.as_str(), "Nice cup");
    }

    #[test]
    fn web_url_accepts_absolute_and_rooted_paths() {
        assert!(WebUrl::new("https://cdn.example.com/a.png").is_ok());
        assert!(WebUrl::new("/uploads/a.png").is_ok());
        assert_eq!(
            WebUrl::new("//evil.example.com/a.png"),
            Err(TypeConstraintError::InvalidUrl)
        );
        assert_eq!(WebUrl::new("not a url"), Err(TypeConstraintError::InvalidUrl));
    }

    #[test]
    fn status_parses_and_toggles() {
        assert_eq!("active".parse::<EntityStatus>(), Ok(EntityStatus::Active));
        assert_eq!(EntityStatus::Active.toggled(), EntityStatus::Inactive);
        assert!("archived".parse::<EntityStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&EntityStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
    }

    #[test]
    fn numeric_ranges_are_enforced() {
        assert!(Price::new(-1).is_err());
        assert_eq!(Price::new(1999).unwrap().to_string(), "19.99");
        assert!(DiscountPercent::new(101).is_err());
        assert!(DiscountPercent::new(-5).is_err());
        assert_eq!(DiscountPercent::new(25).unwrap().get(), 25);
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(52.52, 13.40).is_ok());
    }

    #[test]
    fn currency_code_is_normalized() {
        assert_eq!(CurrencyCode::new(" eur ").unwrap().as_str(), "EUR");
        assert!(CurrencyCode::new("EURO").is_err());
    }

    #[test]
    fn price_parses_decimal_amounts() {
        assert_eq!("19.99".parse::<Price>().unwrap().minor_units(), 1999);
        assert_eq!("19.9".parse::<Price>().unwrap().minor_units(), 1990);
        assert_eq!(" 5 ".parse::<Price>().unwrap().minor_units(), 500);
        assert_eq!(".5".parse::<Price>().unwrap().minor_units(), 50);
        assert!("1.999".parse::<Price>().is_err());
        assert!("-1".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
        assert!(".".parse::<Price>().is_err());
    }
}
