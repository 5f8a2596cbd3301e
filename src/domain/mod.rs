//! Domain aggregates managed by the dashboard.

use crate::domain::types::EntityStatus;

pub mod address;
pub mod banner;
pub mod brand;
pub mod business;
pub mod category;
pub mod pricing;
pub mod product;
pub mod types;
pub mod user;

/// Behaviour every listable record exposes to the generic list controller.
pub trait Record {
    /// Raw identifier used to match records across list patches.
    fn record_id(&self) -> i32;

    /// Current activation state.
    fn status(&self) -> EntityStatus;
}

macro_rules! impl_record {
    ($ty:ty, $status:ident) => {
        impl Record for $ty {
            fn record_id(&self) -> i32 {
                self.id.get()
            }

            fn status(&self) -> EntityStatus {
                self.$status
            }
        }
    };
}

impl_record!(user::User, account_status);
impl_record!(product::Product, status);
impl_record!(category::Category, status);
impl_record!(brand::Brand, status);
impl_record!(banner::Banner, status);
impl_record!(address::Address, status);
