//! Emission factor tables
//!
//! Categories, shipping distances and shipping speeds form a closed set of
//! labels. Their numeric factors live in a [`FactorTable`] that callers can
//! inspect, override field by field, or load from YAML.

use crate::error::{CarbonError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

// ============================================================================
// Category
// ============================================================================

/// Purchase category. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Electronics (phone, laptop)")]
    Electronics,
    #[serde(rename = "Clothing (fast fashion)")]
    ClothingFastFashion,
    #[serde(rename = "Clothing (sustainable)")]
    ClothingSustainable,
    #[serde(rename = "Groceries / Food (average)")]
    GroceriesAverage,
    #[serde(rename = "Groceries / Plant-based")]
    GroceriesPlantBased,
    #[serde(rename = "Groceries / Animal-based")]
    GroceriesAnimalBased,
    #[serde(rename = "Flight / Travel booking (ticket)")]
    FlightTravel,
    #[serde(rename = "Furniture / Home goods")]
    FurnitureHome,
    #[serde(rename = "Cosmetics / Personal care")]
    CosmeticsPersonalCare,
    #[serde(rename = "Packaged goods")]
    PackagedGoods,
    #[serde(rename = "Books / Media")]
    BooksMedia,
    #[serde(rename = "Sporting goods / Outdoor")]
    SportingOutdoor,
    #[serde(rename = "Services / Subscriptions")]
    ServicesSubscriptions,
    #[serde(rename = "Misc / Other")]
    MiscOther,
}

impl Category {
    /// Category used whenever a label does not resolve
    pub const FALLBACK: Category = Category::MiscOther;

    pub const ALL: [Category; 14] = [
        Category::Electronics,
        Category::ClothingFastFashion,
        Category::ClothingSustainable,
        Category::GroceriesAverage,
        Category::GroceriesPlantBased,
        Category::GroceriesAnimalBased,
        Category::FlightTravel,
        Category::FurnitureHome,
        Category::CosmeticsPersonalCare,
        Category::PackagedGoods,
        Category::BooksMedia,
        Category::SportingOutdoor,
        Category::ServicesSubscriptions,
        Category::MiscOther,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics (phone, laptop)",
            Category::ClothingFastFashion => "Clothing (fast fashion)",
            Category::ClothingSustainable => "Clothing (sustainable)",
            Category::GroceriesAverage => "Groceries / Food (average)",
            Category::GroceriesPlantBased => "Groceries / Plant-based",
            Category::GroceriesAnimalBased => "Groceries / Animal-based",
            Category::FlightTravel => "Flight / Travel booking (ticket)",
            Category::FurnitureHome => "Furniture / Home goods",
            Category::CosmeticsPersonalCare => "Cosmetics / Personal care",
            Category::PackagedGoods => "Packaged goods",
            Category::BooksMedia => "Books / Media",
            Category::SportingOutdoor => "Sporting goods / Outdoor",
            Category::ServicesSubscriptions => "Services / Subscriptions",
            Category::MiscOther => "Misc / Other",
        }
    }

    /// Strict lookup by label (trimmed, case-insensitive)
    pub fn from_label(label: &str) -> Option<Category> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }

    /// Lenient lookup: unknown labels resolve to [`Category::FALLBACK`]
    pub fn resolve(label: &str) -> Category {
        match Self::from_label(label) {
            Some(category) => category,
            None => {
                tracing::debug!(label, fallback = Self::FALLBACK.label(), "unknown category");
                Self::FALLBACK
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Distance / shipping speed
// ============================================================================

/// How far the goods travel before reaching the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum DistanceLevel {
    #[default]
    #[serde(rename = "Local (same city)")]
    Local,
    #[serde(rename = "National (within country)")]
    National,
    #[serde(rename = "International (overseas)")]
    International,
}

impl DistanceLevel {
    pub const ALL: [DistanceLevel; 3] = [
        DistanceLevel::Local,
        DistanceLevel::National,
        DistanceLevel::International,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DistanceLevel::Local => "Local (same city)",
            DistanceLevel::National => "National (within country)",
            DistanceLevel::International => "International (overseas)",
        }
    }
}

impl std::fmt::Display for DistanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DistanceLevel {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if let Some(level) = Self::ALL.iter().find(|d| d.label().eq_ignore_ascii_case(wanted)) {
            return Ok(*level);
        }
        match wanted.to_ascii_lowercase().as_str() {
            "local" => Ok(DistanceLevel::Local),
            "national" => Ok(DistanceLevel::National),
            "international" | "overseas" => Ok(DistanceLevel::International),
            _ => Err(CarbonError::validation(
                "distance",
                format!("unknown shipping distance '{}'", wanted),
            )),
        }
    }
}

/// Delivery speed chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ShippingSpeed {
    #[default]
    #[serde(rename = "Standard (5–8 days)")]
    Standard,
    #[serde(rename = "Two-day")]
    TwoDay,
    #[serde(rename = "Express / Overnight")]
    Express,
}

impl ShippingSpeed {
    pub const ALL: [ShippingSpeed; 3] = [
        ShippingSpeed::Standard,
        ShippingSpeed::TwoDay,
        ShippingSpeed::Express,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShippingSpeed::Standard => "Standard (5–8 days)",
            ShippingSpeed::TwoDay => "Two-day",
            ShippingSpeed::Express => "Express / Overnight",
        }
    }
}

impl std::fmt::Display for ShippingSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ShippingSpeed {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if let Some(speed) = Self::ALL.iter().find(|v| v.label().eq_ignore_ascii_case(wanted)) {
            return Ok(*speed);
        }
        match wanted.to_ascii_lowercase().as_str() {
            "standard" => Ok(ShippingSpeed::Standard),
            "two-day" | "twoday" | "two_day" => Ok(ShippingSpeed::TwoDay),
            "express" | "overnight" => Ok(ShippingSpeed::Express),
            _ => Err(CarbonError::validation(
                "shipping_speed",
                format!("unknown shipping speed '{}'", wanted),
            )),
        }
    }
}

// ============================================================================
// Factor table
// ============================================================================

/// Factor used if the table has neither the category nor the fallback entry
const BUILTIN_FALLBACK_FACTOR: f64 = 0.16;

fn default_version() -> String {
    "1.0".to_string()
}

/// Emission factors (kg CO2e per USD) and shipping multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    #[serde(default = "default_version")]
    pub version: String,
    pub categories: BTreeMap<Category, f64>,
    pub distance: BTreeMap<DistanceLevel, f64>,
    pub shipping: BTreeMap<ShippingSpeed, f64>,
}

impl FactorTable {
    /// Load a table from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CarbonError::Config(format!("Failed to read factor table: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a table from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let table: FactorTable = serde_yaml::from_str(yaml)
            .map_err(|e| CarbonError::Config(format!("Failed to parse factor table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Reject non-finite factors and multipliers below 1.0
    pub fn validate(&self) -> Result<()> {
        for (category, factor) in &self.categories {
            if !factor.is_finite() {
                return Err(CarbonError::Config(format!(
                    "factor for '{}' is not finite",
                    category
                )));
            }
        }
        let multipliers = self
            .distance
            .iter()
            .map(|(k, v)| (k.label(), *v))
            .chain(self.shipping.iter().map(|(k, v)| (k.label(), *v)));
        for (label, multiplier) in multipliers {
            if !multiplier.is_finite() || multiplier < 1.0 {
                return Err(CarbonError::Config(format!(
                    "multiplier for '{}' must be >= 1.0, got {}",
                    label, multiplier
                )));
            }
        }
        Ok(())
    }

    /// Factor for a category, falling back to the fallback category's factor
    pub fn factor(&self, category: Category) -> f64 {
        self.categories
            .get(&category)
            .or_else(|| self.categories.get(&Category::FALLBACK))
            .copied()
            .unwrap_or(BUILTIN_FALLBACK_FACTOR)
    }

    pub fn distance_multiplier(&self, distance: DistanceLevel) -> f64 {
        self.distance.get(&distance).copied().unwrap_or(1.0)
    }

    pub fn speed_multiplier(&self, speed: ShippingSpeed) -> f64 {
        self.shipping.get(&speed).copied().unwrap_or(1.0)
    }

    /// Override one category factor
    pub fn with_factor(mut self, category: Category, factor: f64) -> Self {
        self.categories.insert(category, factor);
        self
    }

    pub fn with_distance_multiplier(mut self, distance: DistanceLevel, multiplier: f64) -> Self {
        self.distance.insert(distance, multiplier);
        self
    }

    pub fn with_speed_multiplier(mut self, speed: ShippingSpeed, multiplier: f64) -> Self {
        self.shipping.insert(speed, multiplier);
        self
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        let categories = BTreeMap::from([
            (Category::Electronics, 0.30),
            (Category::ClothingFastFashion, 0.18),
            (Category::ClothingSustainable, 0.10),
            (Category::GroceriesAverage, 0.22),
            (Category::GroceriesPlantBased, 0.15),
            (Category::GroceriesAnimalBased, 0.35),
            (Category::FlightTravel, 0.55),
            (Category::FurnitureHome, 0.28),
            (Category::CosmeticsPersonalCare, 0.12),
            (Category::PackagedGoods, 0.14),
            (Category::BooksMedia, 0.09),
            (Category::SportingOutdoor, 0.20),
            (Category::ServicesSubscriptions, 0.04),
            (Category::MiscOther, BUILTIN_FALLBACK_FACTOR),
        ]);
        let distance = BTreeMap::from([
            (DistanceLevel::Local, 1.00),
            (DistanceLevel::National, 1.10),
            (DistanceLevel::International, 1.40),
        ]);
        let shipping = BTreeMap::from([
            (ShippingSpeed::Standard, 1.00),
            (ShippingSpeed::TwoDay, 1.07),
            (ShippingSpeed::Express, 1.15),
        ]);

        Self {
            version: default_version(),
            categories,
            distance,
            shipping,
        }
    }
}
