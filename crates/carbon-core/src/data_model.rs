//! Data Model: PurchaseDraft, PurchaseInput, EmissionResult, GeneratedContent
use crate::error::{CarbonError, Result};
use crate::factors::{Category, DistanceLevel, ShippingSpeed};
use serde::{Deserialize, Serialize};

/// Raw, untrusted purchase fields as they arrive from a form or request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseDraft {
    #[serde(default)]
    pub item_name: String,
    /// Category label; unknown labels fall back to "Misc / Other"
    #[serde(default)]
    pub category: String,
    pub price_usd: f64,
    pub quantity: i64,
    /// Approximate weight in kg, 0 or missing if unknown
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Distance label or short name ("local", "national", "international")
    #[serde(default)]
    pub distance: Option<String>,
    /// Speed label or short name ("standard", "two-day", "express")
    #[serde(default)]
    pub shipping_speed: Option<String>,
    #[serde(default)]
    pub donate_offset: bool,
}

impl PurchaseDraft {
    /// Check contract and resolve labels into a [`PurchaseInput`]
    pub fn validate(&self) -> Result<PurchaseInput> {
        if self.quantity < 1 || self.quantity > u32::MAX as i64 {
            return Err(CarbonError::validation(
                "quantity",
                format!("must be a positive integer, got {}", self.quantity),
            ));
        }
        let distance = match &self.distance {
            Some(label) => label.parse()?,
            None => DistanceLevel::default(),
        };
        let shipping_speed = match &self.shipping_speed {
            Some(label) => label.parse()?,
            None => ShippingSpeed::default(),
        };

        PurchaseInput::new(
            self.item_name.clone(),
            Category::resolve(&self.category),
            self.price_usd,
            self.quantity as u32,
            self.weight_kg,
            distance,
            shipping_speed,
            self.donate_offset,
        )
    }
}

/// A validated purchase. Immutable once constructed.
///
/// Deserializing goes through [`PurchaseDraft::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PurchaseDraft")]
pub struct PurchaseInput {
    item_name: String,
    category: Category,
    price_usd: f64,
    quantity: u32,
    weight_kg: Option<f64>,
    distance: DistanceLevel,
    shipping_speed: ShippingSpeed,
    donate_offset: bool,
}

impl TryFrom<PurchaseDraft> for PurchaseInput {
    type Error = CarbonError;

    fn try_from(draft: PurchaseDraft) -> Result<Self> {
        draft.validate()
    }
}

impl PurchaseInput {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        item_name: impl Into<String>,
        category: Category,
        price_usd: f64,
        quantity: u32,
        weight_kg: Option<f64>,
        distance: DistanceLevel,
        shipping_speed: ShippingSpeed,
        donate_offset: bool,
    ) -> Result<Self> {
        if !price_usd.is_finite() || price_usd < 0.0 {
            return Err(CarbonError::validation(
                "price_usd",
                format!("must be a non-negative number, got {}", price_usd),
            ));
        }
        if quantity == 0 {
            return Err(CarbonError::validation("quantity", "must be at least 1"));
        }
        if let Some(weight) = weight_kg {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CarbonError::validation(
                    "weight_kg",
                    format!("must be a non-negative number, got {}", weight),
                ));
            }
        }

        Ok(Self {
            item_name: item_name.into(),
            category,
            price_usd,
            quantity,
            // zero weight means "unknown", same as absent
            weight_kg: weight_kg.filter(|w| *w > 0.0),
            distance,
            shipping_speed,
            donate_offset,
        })
    }

    /// Minimal valid purchase: local, standard shipping, no weight, no offset
    pub fn simple(item_name: impl Into<String>, category: Category, price_usd: f64, quantity: u32) -> Result<Self> {
        Self::new(
            item_name,
            category,
            price_usd,
            quantity,
            None,
            DistanceLevel::Local,
            ShippingSpeed::Standard,
            false,
        )
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price_usd(&self) -> f64 {
        self.price_usd
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Known weight, `None` when absent or zero
    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn distance(&self) -> DistanceLevel {
        self.distance
    }

    pub fn shipping_speed(&self) -> ShippingSpeed {
        self.shipping_speed
    }

    pub fn donate_offset(&self) -> bool {
        self.donate_offset
    }

    /// Item name, or the category label when the name is blank
    pub fn display_label(&self) -> &str {
        if self.item_name.trim().is_empty() {
            self.category.label()
        } else {
            &self.item_name
        }
    }
}

/// Estimated emissions for one purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    /// Raw estimate in kg CO2e
    pub kg_co2: f64,
    /// Estimate after the offset discount, if the buyer donated
    pub kg_after_offset: f64,
}

/// Commentary generated for one purchase and seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub feedback: String,
    pub tip: String,
}
