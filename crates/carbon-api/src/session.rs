//! Purchase session: validates a draft, runs the calculator chain, and keeps
//! a bounded history of recent reports.
use carbon_core::{
    format_kg, format_tonnes, CarbonError, Category, Clock, Comparisons, EmissionEstimator,
    PurchaseDraft, SeedDeriver,
};
use carbon_out::intensity::IntensityBand;
use carbon_out::ContentSelector;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Default number of history entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 7;

/// Everything shown to the buyer for one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReport {
    pub report_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Item name, or category label when unnamed
    pub item: String,
    pub category: Category,
    pub price_usd: f64,
    pub quantity: u32,
    pub seed: u32,
    pub time_bucket: String,
    pub kg_co2: f64,
    pub donate_offset: bool,
    pub kg_after_offset: f64,
    pub formatted_kg: String,
    pub formatted_tonnes: String,
    pub intensity: IntensityBand,
    pub comparisons: Comparisons,
    pub comparison_lines: Vec<String>,
    pub feedback: String,
    pub tip: String,
}

/// One line of recent-calculation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: DateTime<Utc>,
    pub item: String,
    pub category: Category,
    pub price_usd: f64,
    pub quantity: u32,
    /// kg after offset, rounded to grams
    pub kg_co2: f64,
}

impl HistoryEntry {
    /// `2026-10-19T14:32:05Z: AirPods Pro — 30.0 kg CO2e ($100.0)`
    pub fn summary(&self) -> String {
        let label = if self.item.trim().is_empty() {
            self.category.label()
        } else {
            self.item.as_str()
        };
        format!(
            "{}: {} — {:?} kg CO2e (${:?})",
            self.time.to_rfc3339_opts(SecondsFormat::Secs, true),
            label,
            self.kg_co2,
            self.price_usd
        )
    }
}

fn round_to_grams(kg: f64) -> f64 {
    (kg * 1000.0).round() / 1000.0
}

pub struct PurchaseSession {
    deriver: SeedDeriver,
    estimator: EmissionEstimator,
    selector: ContentSelector,
    clock: Arc<dyn Clock>,
    history: Mutex<VecDeque<HistoryEntry>>,
    history_limit: usize,
}

impl PurchaseSession {
    pub fn new(
        estimator: EmissionEstimator,
        selector: ContentSelector,
        clock: Arc<dyn Clock>,
        history_limit: usize,
    ) -> Self {
        Self {
            deriver: SeedDeriver::new(clock.clone()),
            estimator,
            selector,
            clock,
            history: Mutex::new(VecDeque::with_capacity(history_limit)),
            history_limit,
        }
    }

    pub fn estimator(&self) -> &EmissionEstimator {
        &self.estimator
    }

    /// Validate, estimate, generate commentary and record history
    pub fn submit(&self, draft: &PurchaseDraft) -> Result<PurchaseReport, CarbonError> {
        let input = draft.validate().map_err(|e| {
            tracing::warn!(error = %e, "rejected purchase");
            e
        })?;

        let stamp = self.deriver.derive(&input);
        let emission = self.estimator.estimate(&input);
        let kg = emission.kg_after_offset;
        let content = self.selector.generate(&input, kg, stamp.seed);
        let comparisons = Comparisons::from_kg(kg);

        let report = PurchaseReport {
            report_id: Uuid::new_v4(),
            created_at: self.clock.now(),
            item: input.display_label().to_string(),
            category: input.category(),
            price_usd: input.price_usd(),
            quantity: input.quantity(),
            seed: stamp.seed,
            time_bucket: stamp.time_bucket,
            kg_co2: emission.kg_co2,
            donate_offset: input.donate_offset(),
            kg_after_offset: kg,
            formatted_kg: format_kg(kg),
            formatted_tonnes: format_tonnes(kg),
            intensity: IntensityBand::classify(kg),
            comparisons,
            comparison_lines: comparisons.lines(),
            feedback: content.feedback,
            tip: content.tip,
        };

        self.record(HistoryEntry {
            time: report.created_at,
            item: input.item_name().to_string(),
            category: report.category,
            price_usd: report.price_usd,
            quantity: report.quantity,
            kg_co2: round_to_grams(kg),
        });

        tracing::info!(
            report_id = %report.report_id,
            category = %report.category,
            kg = report.kg_after_offset,
            band = %report.intensity,
            "generated purchase report"
        );
        Ok(report)
    }

    /// Most recent entries first
    pub fn history(&self) -> Vec<HistoryEntry> {
        let history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.iter().cloned().collect()
    }

    fn record(&self, entry: HistoryEntry) {
        if self.history_limit == 0 {
            return;
        }
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.push_front(entry);
        history.truncate(self.history_limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_core::FixedClock;

    fn session(limit: usize) -> PurchaseSession {
        PurchaseSession::new(
            EmissionEstimator::default(),
            ContentSelector::default(),
            Arc::new(FixedClock::at(2026, 10, 19, 14, 32)),
            limit,
        )
    }

    fn electronics() -> PurchaseDraft {
        PurchaseDraft {
            item_name: "Laptop sleeve".to_string(),
            category: "Electronics (phone, laptop)".to_string(),
            price_usd: 100.0,
            quantity: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_end_to_end() {
        let report = session(7).submit(&electronics()).unwrap();
        assert!((report.kg_co2 - 30.0).abs() < 1e-9);
        assert_eq!(report.formatted_kg, "30.00 kg CO2e");
        assert_eq!(report.formatted_tonnes, "0.030 t CO2e");
        assert_eq!(report.intensity, IntensityBand::Strong);
        assert_eq!(report.time_bucket, "202610191432");
        assert!(report.feedback.contains("Laptop sleeve"));
        assert_eq!(report.comparison_lines.len(), 3);
    }

    #[test]
    fn test_same_minute_same_content() {
        let session = session(7);
        let a = session.submit(&electronics()).unwrap();
        let b = session.submit(&electronics()).unwrap();
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.feedback, b.feedback);
        assert_eq!(a.tip, b.tip);
        assert_ne!(a.report_id, b.report_id);
    }

    #[test]
    fn test_offset_discount_feeds_banding() {
        // 5.5 kg raw, 4.95 kg after the offset: strong becomes noticeable
        let draft = PurchaseDraft {
            item_name: "Novel".to_string(),
            category: "Services / Subscriptions".to_string(),
            price_usd: 137.5,
            quantity: 1,
            donate_offset: true,
            ..Default::default()
        };
        let report = session(7).submit(&draft).unwrap();
        assert!((report.kg_co2 - 5.5).abs() < 1e-9);
        assert!((report.kg_after_offset - 4.95).abs() < 1e-9);
        assert_eq!(report.intensity, IntensityBand::Noticeable);
        assert_eq!(report.formatted_kg, "4.95 kg CO2e");
    }

    #[test]
    fn test_rejected_draft_not_recorded() {
        let session = session(7);
        let mut draft = electronics();
        draft.quantity = 0;
        assert!(session.submit(&draft).is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_newest_first_and_capped() {
        let session = session(3);
        for price in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let mut draft = electronics();
            draft.price_usd = price;
            session.submit(&draft).unwrap();
        }
        let history = session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].price_usd, 5.0);
        assert_eq!(history[2].price_usd, 3.0);
    }

    #[test]
    fn test_history_summary() {
        let session = session(7);
        let mut draft = electronics();
        draft.item_name = String::new();
        session.submit(&draft).unwrap();

        let summary = session.history()[0].summary();
        assert_eq!(
            summary,
            "2026-10-19T14:32:00Z: Electronics (phone, laptop) — 30.0 kg CO2e ($100.0)"
        );
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let session = session(0);
        session.submit(&electronics()).unwrap();
        assert!(session.history().is_empty());
    }
}
