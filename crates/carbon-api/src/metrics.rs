//! Prometheus metrics served on `/metrics`.
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub reports_total: IntCounter,
    pub validation_failures_total: IntCounter,
    pub report_kg: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let reports_total = IntCounter::new("carbon_reports_total", "Purchase reports generated")?;
        let validation_failures_total = IntCounter::new(
            "carbon_validation_failures_total",
            "Purchases rejected at validation",
        )?;
        // bucket edges match the intensity bands
        let report_kg = Histogram::with_opts(
            HistogramOpts::new("carbon_report_kg", "Estimated kg CO2e after offset")
                .buckets(vec![0.5, 5.0, 50.0, 500.0]),
        )?;

        registry.register(Box::new(reports_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(report_kg.clone()))?;

        Ok(Self {
            registry,
            reports_total,
            validation_failures_total,
            report_kg,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
