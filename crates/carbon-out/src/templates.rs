//! Commentary template loading for CARBON-OUT.
//!
//! Supports the commentary-templates.yaml format with:
//! - Feedback sentences with an `{{item}}` placeholder
//! - Sarcastic suffixes and per-band intensity remarks
//! - Tip templates with an optional category condition and `{{category}}`
//! - Fixed extra clauses and punchlines

use crate::intensity::IntensityBand;
use carbon_core::Category;
use serde::{Deserialize, Serialize};

/// Built-in pools, shipped with the crate under `grammars/`
const DEFAULT_TEMPLATES_YAML: &str = include_str!("../grammars/commentary-templates.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub feedback: FeedbackPools,
    pub tips: TipPools,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPools {
    pub templates: Vec<String>,
    pub suffixes: Vec<String>,
    pub intensity: IntensityPools,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityPools {
    pub mild: Vec<String>,
    pub noticeable: Vec<String>,
    pub strong: Vec<String>,
    pub epic: Vec<String>,
}

impl IntensityPools {
    pub fn for_band(&self, band: IntensityBand) -> &[String] {
        match band {
            IntensityBand::Mild => &self.mild,
            IntensityBand::Noticeable => &self.noticeable,
            IntensityBand::Strong => &self.strong,
            IntensityBand::Epic => &self.epic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipPools {
    pub templates: Vec<TipTemplate>,
    pub extras: TipExtras,
    pub punchlines: Vec<String>,
}

/// Which categories a tip template applies to.
///
/// In YAML a missing `categories` key means [`TipCondition::Always`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Category>>", into = "Option<Vec<Category>>")]
pub enum TipCondition {
    #[default]
    Always,
    Categories(Vec<Category>),
}

impl TipCondition {
    pub fn applies_to(&self, category: Category) -> bool {
        match self {
            TipCondition::Always => true,
            TipCondition::Categories(categories) => categories.contains(&category),
        }
    }
}

impl From<Option<Vec<Category>>> for TipCondition {
    fn from(categories: Option<Vec<Category>>) -> Self {
        match categories {
            None => TipCondition::Always,
            Some(categories) => TipCondition::Categories(categories),
        }
    }
}

impl From<TipCondition> for Option<Vec<Category>> {
    fn from(condition: TipCondition) -> Self {
        match condition {
            TipCondition::Always => None,
            TipCondition::Categories(categories) => Some(categories),
        }
    }
}

/// A single tip template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipTemplate {
    #[serde(default, rename = "categories")]
    pub condition: TipCondition,
    pub text: String,
}

/// Clauses appended to a tip when the purchase matches, in priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipExtras {
    pub express: String,
    pub heavy: String,
    pub international: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file: {}", e))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let file: TemplatesFile = serde_yaml::from_str(yaml)
            .map_err(|e| format!("Failed to parse templates YAML: {}", e))?;
        file.validate()?;
        Ok(file)
    }

    /// Every pool a draw can come from must be non-empty
    pub fn validate(&self) -> Result<(), String> {
        let pools: [(&str, usize); 8] = [
            ("feedback.templates", self.feedback.templates.len()),
            ("feedback.suffixes", self.feedback.suffixes.len()),
            ("feedback.intensity.mild", self.feedback.intensity.mild.len()),
            ("feedback.intensity.noticeable", self.feedback.intensity.noticeable.len()),
            ("feedback.intensity.strong", self.feedback.intensity.strong.len()),
            ("feedback.intensity.epic", self.feedback.intensity.epic.len()),
            ("tips.templates", self.tips.templates.len()),
            ("tips.punchlines", self.tips.punchlines.len()),
        ];
        match pools.iter().find(|(_, len)| *len == 0) {
            Some((name, _)) => Err(format!("Pool '{}' is empty", name)),
            None => Ok(()),
        }
    }

    /// Indices of tip templates applying to a category; all of them if none do
    pub fn tip_candidates(&self, category: Category) -> Vec<usize> {
        let matching: Vec<usize> = self
            .tips
            .templates
            .iter()
            .enumerate()
            .filter(|(_, tip)| tip.condition.applies_to(category))
            .map(|(i, _)| i)
            .collect();

        if matching.is_empty() {
            (0..self.tips.templates.len()).collect()
        } else {
            matching
        }
    }
}

impl Default for TemplatesFile {
    fn default() -> Self {
        // embedded asset, checked by test_builtin_templates_parse
        Self::from_yaml(DEFAULT_TEMPLATES_YAML).unwrap_or_else(|e| {
            panic!("built-in commentary templates are invalid: {}", e)
        })
    }
}
