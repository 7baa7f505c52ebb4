//! Unit conversion and display formatting
//!
//! The display strings are exact contracts: sub-kilogram values are shown in
//! whole grams, everything else in kilograms with two decimals, tonnes with
//! three.

use serde::{Deserialize, Serialize};

/// kg per tonne
pub const KG_PER_TONNE: f64 = 1000.0;
/// Average car, kg CO2 per km driven
pub const CAR_KG_PER_KM: f64 = 0.192;
/// kg CO2 a mature tree absorbs in one year
pub const TREE_ABSORPTION_KG_PER_YEAR: f64 = 21.77;
/// kg CO2e per smartphone charge
pub const PHONE_CHARGE_KG: f64 = 0.000015;

pub fn to_tonnes(kg: f64) -> f64 {
    kg / KG_PER_TONNE
}

pub fn to_car_km(kg: f64) -> f64 {
    kg / CAR_KG_PER_KM
}

pub fn to_tree_years(kg: f64) -> f64 {
    kg / TREE_ABSORPTION_KG_PER_YEAR
}

pub fn to_phone_charges(kg: f64) -> f64 {
    kg / PHONE_CHARGE_KG
}

/// `"500 g CO2e"` below one kilogram, `"1.00 kg CO2e"` from one kilogram up
pub fn format_kg(kg: f64) -> String {
    if kg < 1.0 {
        format!("{:.0} g CO2e", kg * 1000.0)
    } else {
        format!("{:.2} kg CO2e", kg)
    }
}

/// `"1.000 t CO2e"`
pub fn format_tonnes(kg: f64) -> String {
    format!("{:.3} t CO2e", to_tonnes(kg))
}

/// Round to a whole number and group thousands with commas (`12,345`)
pub fn format_grouped(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Everyday equivalents of an emission figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    pub car_km: f64,
    pub tree_years: f64,
    pub phone_charges: f64,
}

impl Comparisons {
    pub fn from_kg(kg: f64) -> Self {
        Self {
            car_km: to_car_km(kg),
            tree_years: to_tree_years(kg),
            phone_charges: to_phone_charges(kg),
        }
    }

    /// Human-readable lines, one per comparison
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Equivalent to driving ~{} km by car.", format_grouped(self.car_km)),
            format!(
                "Equivalent to the CO2 absorbed by ~{:.1} tree-years.",
                self.tree_years
            ),
            format!(
                "Equivalent to ~{} phone charges (because why not?).",
                format_grouped(self.phone_charges)
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kg_contract() {
        assert_eq!(format_kg(0.5), "500 g CO2e");
        assert_eq!(format_kg(1.0), "1.00 kg CO2e");
        assert_eq!(format_kg(30.0), "30.00 kg CO2e");
        assert_eq!(format_kg(0.0), "0 g CO2e");
        assert_eq!(format_kg(0.9994), "999 g CO2e");
        assert_eq!(format_kg(1234.567), "1234.57 kg CO2e");
    }

    #[test]
    fn test_format_tonnes_contract() {
        assert_eq!(format_tonnes(1000.0), "1.000 t CO2e");
        assert_eq!(format_tonnes(30.0), "0.030 t CO2e");
    }

    #[test]
    fn test_conversions() {
        assert!((to_car_km(0.192) - 1.0).abs() < 1e-12);
        assert!((to_tree_years(21.77) - 1.0).abs() < 1e-12);
        assert!((to_phone_charges(0.000015) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(156.25), "156");
        assert_eq!(format_grouped(2_000_000.4), "2,000,000");
        assert_eq!(format_grouped(-12345.0), "-12,345");
    }

    #[test]
    fn test_comparison_lines() {
        let lines = Comparisons::from_kg(30.0).lines();
        assert_eq!(lines[0], "Equivalent to driving ~156 km by car.");
        assert_eq!(lines[1], "Equivalent to the CO2 absorbed by ~1.4 tree-years.");
        assert_eq!(lines[2], "Equivalent to ~2,000,000 phone charges (because why not?).");
    }
}
