//! Intensity bands for feedback tone

use serde::{Deserialize, Serialize};

/// Four ordered kg ranges. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityBand {
    /// below 0.5 kg
    Mild,
    /// 0.5 kg up to 5 kg
    Noticeable,
    /// 5 kg up to 50 kg
    Strong,
    /// 50 kg and above
    Epic,
}

impl IntensityBand {
    pub const NOTICEABLE_FROM_KG: f64 = 0.5;
    pub const STRONG_FROM_KG: f64 = 5.0;
    pub const EPIC_FROM_KG: f64 = 50.0;

    pub fn classify(kg: f64) -> Self {
        if kg < Self::NOTICEABLE_FROM_KG {
            IntensityBand::Mild
        } else if kg < Self::STRONG_FROM_KG {
            IntensityBand::Noticeable
        } else if kg < Self::EPIC_FROM_KG {
            IntensityBand::Strong
        } else {
            IntensityBand::Epic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityBand::Mild => "mild",
            IntensityBand::Noticeable => "noticeable",
            IntensityBand::Strong => "strong",
            IntensityBand::Epic => "epic",
        }
    }
}

impl std::fmt::Display for IntensityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
