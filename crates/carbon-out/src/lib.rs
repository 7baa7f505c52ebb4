//! CARBON-OUT: Seeded Sarcastic Commentary
//!
//! Picks a feedback message and a sustainability tip for a purchase. Every
//! draw comes from a generator built locally from the purchase seed, so the
//! same (inputs, seed) pair always produces the same text and concurrent
//! calls share no state.
//!
//! # Example
//!
//! ```ignore
//! use carbon_out::{select_feedback, select_tip};
//! use carbon_core::{Category, DistanceLevel, ShippingSpeed};
//!
//! let feedback = select_feedback("AirPods Pro", 30.0, 1234);
//! let tip = select_tip(Category::Electronics, DistanceLevel::Local, None, ShippingSpeed::Express, 1234);
//! println!("{}\n{}", feedback, tip);
//! ```

pub mod intensity;
pub mod renderer;
pub mod templates;

use carbon_core::{Category, DistanceLevel, GeneratedContent, PurchaseInput, ShippingSpeed};
use intensity::IntensityBand;
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use renderer::TemplateRenderer;
use templates::TemplatesFile;
use thiserror::Error;

/// Added to the seed for tip draws so they are independent of feedback draws
pub const TIP_SEED_OFFSET: u64 = 7;

/// Items heavier than this (kg) get the consolidated-shipping clause
pub const HEAVY_ITEM_KG: f64 = 10.0;

/// At most this many extra clauses are appended to a tip
pub const MAX_TIP_EXTRAS: usize = 2;

/// Errors that can occur while preparing commentary templates
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
}

lazy_static! {
    /// Selector over the built-in pools, used by the free functions
    static ref DEFAULT_SELECTOR: ContentSelector = ContentSelector::default();
}

/// Chooses feedback and tips from one set of template pools
pub struct ContentSelector {
    templates: TemplatesFile,
    renderer: TemplateRenderer<'static>,
}

impl ContentSelector {
    /// Compile a selector over validated pools
    pub fn new(templates: TemplatesFile) -> Result<Self, RenderError> {
        templates.validate().map_err(RenderError::Template)?;
        let renderer = TemplateRenderer::new(&templates).map_err(RenderError::Template)?;
        Ok(Self { templates, renderer })
    }

    /// Load pools from a YAML file
    pub fn load(path: &str) -> Result<Self, RenderError> {
        let templates = TemplatesFile::load(path).map_err(RenderError::Template)?;
        Self::new(templates)
    }

    pub fn templates(&self) -> &TemplatesFile {
        &self.templates
    }

    /// Sarcastic feedback for an item (or category) label.
    ///
    /// Draw order: sentence template, suffix, intensity remark. Every draw is
    /// a uniform `choose` on a generator seeded with `seed`.
    pub fn select_feedback(&self, label: &str, kg_after_offset: f64, seed: u32) -> String {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let feedback = &self.templates.feedback;

        let indices: Vec<usize> = (0..feedback.templates.len()).collect();
        let index = indices.choose(&mut rng).copied().unwrap_or_default();
        let raw = feedback.templates.get(index).map(String::as_str).unwrap_or_default();
        let sentence = self.renderer.render_feedback(index, label, raw);

        let suffix = pick(&feedback.suffixes, &mut rng);

        let band = IntensityBand::classify(kg_after_offset);
        let line = pick(feedback.intensity.for_band(band), &mut rng);

        format!("{} {} {}", sentence, line, suffix)
    }

    /// Context-aware sustainability tip.
    ///
    /// Draw order: tip template (from the category-filtered set), punchline,
    /// on a generator seeded with `seed + TIP_SEED_OFFSET`. Extra clauses are
    /// deterministic and consume no draws.
    pub fn select_tip(
        &self,
        category: Category,
        distance: DistanceLevel,
        weight_kg: Option<f64>,
        shipping_speed: ShippingSpeed,
        seed: u32,
    ) -> String {
        let mut rng = StdRng::seed_from_u64(u64::from(seed) + TIP_SEED_OFFSET);
        let tips = &self.templates.tips;

        let candidates = self.templates.tip_candidates(category);
        let index = candidates.choose(&mut rng).copied().unwrap_or_default();
        let raw = tips.templates.get(index).map(|t| t.text.as_str()).unwrap_or_default();
        let tip = self.renderer.render_tip(index, category.label(), raw);

        let extras = self.tip_extras(distance, weight_kg, shipping_speed);
        let punchline = pick(&tips.punchlines, &mut rng);

        if extras.is_empty() {
            format!("{} {}", tip, punchline)
        } else {
            format!("{} {} {}", tip, extras.join(" "), punchline)
        }
    }

    /// Extra clauses in priority order: express, heavy, international. Capped at two.
    pub fn tip_extras(
        &self,
        distance: DistanceLevel,
        weight_kg: Option<f64>,
        shipping_speed: ShippingSpeed,
    ) -> Vec<&str> {
        let extras = &self.templates.tips.extras;
        let conditions = [
            (shipping_speed == ShippingSpeed::Express, extras.express.as_str()),
            (weight_kg.is_some_and(|w| w > HEAVY_ITEM_KG), extras.heavy.as_str()),
            (distance == DistanceLevel::International, extras.international.as_str()),
        ];

        conditions
            .into_iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, clause)| clause)
            .take(MAX_TIP_EXTRAS)
            .collect()
    }

    /// Feedback and tip for a validated purchase
    pub fn generate(&self, input: &PurchaseInput, kg_after_offset: f64, seed: u32) -> GeneratedContent {
        GeneratedContent {
            feedback: self.select_feedback(input.display_label(), kg_after_offset, seed),
            tip: self.select_tip(
                input.category(),
                input.distance(),
                input.weight_kg(),
                input.shipping_speed(),
                seed,
            ),
        }
    }
}

impl Default for ContentSelector {
    fn default() -> Self {
        let templates = TemplatesFile::default();
        match TemplateRenderer::new(&templates) {
            Ok(renderer) => Self { templates, renderer },
            Err(e) => panic!("built-in commentary templates do not compile: {}", e),
        }
    }
}

fn pick<'a>(pool: &'a [String], rng: &mut StdRng) -> &'a str {
    pool.choose(rng).map(String::as_str).unwrap_or_default()
}

/// Feedback from the built-in pools
pub fn select_feedback(label: &str, kg_after_offset: f64, seed: u32) -> String {
    DEFAULT_SELECTOR.select_feedback(label, kg_after_offset, seed)
}

/// Tip from the built-in pools
pub fn select_tip(
    category: Category,
    distance: DistanceLevel,
    weight_kg: Option<f64>,
    shipping_speed: ShippingSpeed,
    seed: u32,
) -> String {
    DEFAULT_SELECTOR.select_tip(category, distance, weight_kg, shipping_speed, seed)
}
