//! Emission estimation
//!
//! kg CO2e = price × category factor × quantity × distance × speed, plus a
//! sub-linear weight term, clamped at zero.

use crate::data_model::{EmissionResult, PurchaseInput};
use crate::factors::{Category, DistanceLevel, FactorTable, ShippingSpeed};

/// Multiplier on `sqrt(weight_kg)` for the flat transport term
pub const WEIGHT_TERM_COEFFICIENT: f64 = 1.5;

/// Share of the estimate removed when the buyer donates to offsets
pub const OFFSET_DISCOUNT: f64 = 0.10;

/// Estimate kg CO2e for a purchase. Never fails.
pub fn estimate(
    table: &FactorTable,
    category: Category,
    price_usd: f64,
    quantity: u32,
    distance: DistanceLevel,
    weight_kg: Option<f64>,
    shipping_speed: ShippingSpeed,
) -> f64 {
    let base = price_usd * table.factor(category) * f64::from(quantity);
    let mut result = base * table.distance_multiplier(distance);
    result *= table.speed_multiplier(shipping_speed);
    result += weight_term(weight_kg);
    result.max(0.0)
}

/// Additive transport term; zero for absent or non-positive weight
pub fn weight_term(weight_kg: Option<f64>) -> f64 {
    match weight_kg {
        Some(weight) if weight > 0.0 => weight.sqrt() * WEIGHT_TERM_COEFFICIENT,
        _ => 0.0,
    }
}

/// Apply the 10% offset discount when requested
pub fn apply_offset(kg: f64, donate_offset: bool) -> f64 {
    if donate_offset {
        kg * (1.0 - OFFSET_DISCOUNT)
    } else {
        kg
    }
}

/// Estimator bound to one factor table
#[derive(Debug, Clone, Default)]
pub struct EmissionEstimator {
    table: FactorTable,
}

impl EmissionEstimator {
    pub fn new(table: FactorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FactorTable {
        &self.table
    }

    /// Raw and offset-adjusted estimate for a validated purchase
    pub fn estimate(&self, input: &PurchaseInput) -> EmissionResult {
        let kg_co2 = estimate(
            &self.table,
            input.category(),
            input.price_usd(),
            input.quantity(),
            input.distance(),
            input.weight_kg(),
            input.shipping_speed(),
        );
        EmissionResult {
            kg_co2,
            kg_after_offset: apply_offset(kg_co2, input.donate_offset()),
        }
    }
}
