//! Process configuration from environment variables
use crate::session::DEFAULT_HISTORY_LIMIT;
use carbon_core::CarbonError;

/// Default listen address, overridable with CARBON_ADDR
pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: String,
    /// YAML factor table; built-in defaults when unset
    pub factors_path: Option<String>,
    /// YAML commentary pools; built-in defaults when unset
    pub templates_path: Option<String>,
    pub history_limit: usize,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, CarbonError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CarbonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let history_limit = match lookup("CARBON_HISTORY_LIMIT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CarbonError::Config(format!("CARBON_HISTORY_LIMIT must be a count, got '{}'", raw))
            })?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            addr: lookup("CARBON_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            factors_path: lookup("CARBON_FACTORS_PATH").filter(|p| !p.trim().is_empty()),
            templates_path: lookup("CARBON_TEMPLATES_PATH").filter(|p| !p.trim().is_empty()),
            history_limit,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            factors_path: None,
            templates_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
