//! Seed derivation
//!
//! A seed is a BLAKE3 digest of the purchase's identifying fields plus a
//! minute-resolution time bucket, reduced to 32 bits. Identical submissions
//! inside the same minute get the same seed (and therefore the same text);
//! the next minute may produce different commentary.

use crate::clock::{Clock, SystemClock};
use crate::data_model::PurchaseInput;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Joins canonical field strings before the time bucket is appended
pub const SEED_FIELD_SEPARATOR: &str = "|";

/// Hash the joined fields and bucket, keep the digest modulo 2^32.
///
/// Reading the 256-bit digest as a big-endian integer and reducing it modulo
/// 2^32 leaves exactly its last four bytes.
pub fn derive_seed<S: AsRef<str>>(fields: &[S], time_bucket: &str) -> u32 {
    let mut material = fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(SEED_FIELD_SEPARATOR);
    material.push_str(time_bucket);

    let digest = blake3::hash(material.as_bytes());
    let bytes = digest.as_bytes();
    u32::from_be_bytes([bytes[28], bytes[29], bytes[30], bytes[31]])
}

/// Canonical string forms of the fields that identify a purchase.
///
/// Floats use their shortest round-trip form with a trailing `.0` for whole
/// numbers; an unknown weight renders like a zero weight.
pub fn seed_fields(input: &PurchaseInput) -> [String; 7] {
    [
        input.item_name().to_string(),
        input.category().label().to_string(),
        format!("{:?}", input.price_usd()),
        input.quantity().to_string(),
        format!("{:?}", input.weight_kg().unwrap_or(0.0)),
        input.distance().label().to_string(),
        input.shipping_speed().label().to_string(),
    ]
}

/// A seed together with the bucket it was derived in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStamp {
    pub seed: u32,
    pub time_bucket: String,
}

/// Derives seeds for purchases using an injectable clock
#[derive(Clone)]
pub struct SeedDeriver {
    clock: Arc<dyn Clock>,
}

impl SeedDeriver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Seed for the purchase in the current time bucket
    pub fn derive(&self, input: &PurchaseInput) -> SeedStamp {
        let time_bucket = self.clock.time_bucket();
        let seed = derive_seed(&seed_fields(input), &time_bucket);
        tracing::debug!(seed, bucket = %time_bucket, "derived seed");
        SeedStamp { seed, time_bucket }
    }
}

impl Default for SeedDeriver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for SeedDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SeedDeriver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::factors::{Category, DistanceLevel, ShippingSpeed};

    fn purchase(price: f64) -> PurchaseInput {
        PurchaseInput::new(
            "AirPods Pro",
            Category::Electronics,
            price,
            1,
            Some(0.2),
            DistanceLevel::National,
            ShippingSpeed::TwoDay,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_same_fields_same_bucket_same_seed() {
        let fields = ["a", "b", "49.99"];
        assert_eq!(derive_seed(&fields, "202610191432"), derive_seed(&fields, "202610191432"));
    }

    #[test]
    fn test_changed_field_changes_seed() {
        let base = derive_seed(&["AirPods", "Electronics", "49.99"], "202610191432");
        assert_ne!(base, derive_seed(&["AirPods", "Electronics", "50.0"], "202610191432"));
        assert_ne!(base, derive_seed(&["AirPods", "Electronics", "49.99"], "202610191433"));
    }

    #[test]
    fn test_seed_is_low_bytes_of_digest() {
        let digest = blake3::hash(b"x|y202601010000");
        let hex = digest.to_hex();
        let expected = u32::from_str_radix(&hex[56..64], 16).unwrap();
        assert_eq!(derive_seed(&["x", "y"], "202601010000"), expected);
    }

    #[test]
    fn test_canonical_fields() {
        let fields = seed_fields(&purchase(100.0));
        assert_eq!(fields[2], "100.0");
        assert_eq!(fields[4], "0.2");
        assert_eq!(fields[5], "National (within country)");
        assert_eq!(fields[6], "Two-day");
    }

    #[test]
    fn test_deriver_uses_injected_clock() {
        let deriver = SeedDeriver::new(Arc::new(FixedClock::at(2026, 10, 19, 9, 5)));
        let first = deriver.derive(&purchase(49.99));
        let second = deriver.derive(&purchase(49.99));
        assert_eq!(first, second);
        assert_eq!(first.time_bucket, "202610190905");
        assert_ne!(first.seed, deriver.derive(&purchase(59.99)).seed);

        let next_minute = SeedDeriver::new(Arc::new(FixedClock::at(2026, 10, 19, 9, 6)));
        assert_ne!(first.seed, next_minute.derive(&purchase(49.99)).seed);
    }
}
