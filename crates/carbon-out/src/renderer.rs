//! Template rendering for CARBON-OUT.
//!
//! Uses Handlebars for placeholder substitution, without HTML escaping.

use handlebars::Handlebars;
use serde_json::{json, Value};

use crate::templates::TemplatesFile;

/// Compiled renderer with every pool template registered by name
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateRenderer<'a> {
    /// Compile all feedback and tip templates
    pub fn new(templates: &TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (i, template) in templates.feedback.templates.iter().enumerate() {
            handlebars
                .register_template_string(&feedback_name(i), template)
                .map_err(|e| format!("Feedback template {} is invalid: {}", i, e))?;
        }
        for (i, tip) in templates.tips.templates.iter().enumerate() {
            handlebars
                .register_template_string(&tip_name(i), &tip.text)
                .map_err(|e| format!("Tip template {} is invalid: {}", i, e))?;
        }

        Ok(TemplateRenderer { handlebars })
    }

    /// Render feedback template `index` for an item label
    pub fn render_feedback(&self, index: usize, label: &str, fallback: &str) -> String {
        let data = json!({ "item": label });
        self.render_or(&feedback_name(index), &data, fallback)
    }

    /// Render tip template `index` for a category label
    pub fn render_tip(&self, index: usize, category: &str, fallback: &str) -> String {
        let data = json!({ "category": category });
        self.render_or(&tip_name(index), &data, fallback)
    }

    fn render_or(&self, name: &str, data: &Value, fallback: &str) -> String {
        match self.handlebars.render(name, data) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(template = name, error = %e, "render failed, using raw template");
                fallback.to_string()
            }
        }
    }
}

fn feedback_name(index: usize) -> String {
    format!("feedback_{}", index)
}

fn tip_name(index: usize) -> String {
    format!("tip_{}", index)
}
