//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod food_log;
pub mod food_search;
pub mod profile;
pub mod user;

pub use food_log::FoodLogService;
pub use food_search::FoodSearchService;
pub use profile::ProfileService;
pub use user::UserService;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a NUMERIC column value for the API
pub(crate) fn dec_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Convert an API number for a NUMERIC column
pub(crate) fn f64_to_dec(f: f64) -> Decimal {
    Decimal::try_from(f).unwrap_or(Decimal::ZERO)
}
