//! Carbon Core: seed derivation, emission estimation and unit conversion
//!
//! Every function here is pure and synchronous. The only wall-clock
//! dependency is the [`Clock`] used to bucket seeds by minute, and it is
//! injected.
//!
//! # Example
//!
//! ```
//! use carbon_core::{estimate, format_kg, Category, DistanceLevel, FactorTable, ShippingSpeed};
//!
//! let kg = estimate(
//!     &FactorTable::default(),
//!     Category::Electronics,
//!     100.0,
//!     1,
//!     DistanceLevel::Local,
//!     None,
//!     ShippingSpeed::Standard,
//! );
//! assert_eq!(format_kg(kg), "30.00 kg CO2e");
//! ```

pub mod clock;
pub mod data_model;
pub mod error;
pub mod estimator;
pub mod factors;
pub mod seed;
pub mod units;

pub use clock::{time_bucket, Clock, FixedClock, SystemClock};
pub use data_model::{EmissionResult, GeneratedContent, PurchaseDraft, PurchaseInput};
pub use error::{CarbonError, Result};
pub use estimator::{apply_offset, estimate, EmissionEstimator, OFFSET_DISCOUNT};
pub use factors::{Category, DistanceLevel, FactorTable, ShippingSpeed};
pub use seed::{derive_seed, seed_fields, SeedDeriver, SeedStamp};
pub use units::{
    format_kg, format_tonnes, to_car_km, to_phone_charges, to_tree_years, Comparisons,
};

/// Engine version reported by the API
pub const CARBON_VERSION: &str = "1.0.0";
