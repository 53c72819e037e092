use crate::stats::SummaryStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value axis scale for box plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Linear,
    Log10,
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(ScaleMode::Linear),
            "log10" | "log" => Ok(ScaleMode::Log10),
            other => Err(format!("unknown scale '{}', expected linear or log10", other)),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Linear => f.write_str("linear"),
            ScaleMode::Log10 => f.write_str("log10"),
        }
    }
}

/// The value range a renderer should draw, and the scale it applies to.
///
/// `scale` can differ from the requested mode: a log10 request falls back
/// to linear when no group has a positive minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub scale: ScaleMode,
    pub min: f64,
    pub max: f64,
}

/// Axis domain covering every box in `stats`.
///
/// Linear axes always include zero. Log10 axes start at the smallest
/// positive group minimum.
pub fn value_domain(stats: &[SummaryStats], mode: ScaleMode) -> Option<AxisDomain> {
    let max = stats.iter().map(|s| s.max).reduce(f64::max)?;
    let min = stats.iter().map(|s| s.min).reduce(f64::min)?;
    if mode == ScaleMode::Log10 {
        let positive = stats
            .iter()
            .map(|s| s.min)
            .filter(|m| *m > 0.0)
            .reduce(f64::min);
        match positive {
            Some(min) => {
                return Some(AxisDomain {
                    scale: ScaleMode::Log10,
                    min,
                    max,
                })
            }
            None => log::debug!("[WQD] scale: no positive minimum, log10 falls back to linear"),
        }
    }
    Some(AxisDomain {
        scale: ScaleMode::Linear,
        min: min.min(0.0),
        max,
    })
}
