//! Maturity index computation and harvest classification

use serde::{Deserialize, Serialize};

use super::sample::PodColorCount;

/// PMI percentage at or above which mechanized harvest is recommended
pub const HARVEST_THRESHOLD_PERCENT: f64 = 70.0;

/// Harvest readiness classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HarvestReadiness {
    Ready,
    NotYetReady,
}

impl HarvestReadiness {
    /// Advisory message shown alongside a classified sample
    pub fn recommendation(&self) -> &'static str {
        match self {
            HarvestReadiness::Ready => "Start mechanized harvesting.",
            HarvestReadiness::NotYetReady => "Not yet the ideal time to harvest.",
        }
    }
}

impl std::fmt::Display for HarvestReadiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestReadiness::Ready => write!(f, "harvest-ready"),
            HarvestReadiness::NotYetReady => write!(f, "not yet ready"),
        }
    }
}

/// Classify a defined PMI percentage against the harvest threshold
pub fn classify_readiness(pmi_percent: f64) -> HarvestReadiness {
    if pmi_percent >= HARVEST_THRESHOLD_PERCENT {
        HarvestReadiness::Ready
    } else {
        HarvestReadiness::NotYetReady
    }
}

/// Outcome of the maturity computation for one sample
///
/// `pmi` is `None` when the sample held no pods at all: an empty sample is
/// undefined, not 0% mature, and callers must keep the two apart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MaturityResult {
    /// Peanut Maturity Index, percent of pods in the mature classes
    pub pmi: Option<f64>,
}

impl MaturityResult {
    pub fn is_defined(&self) -> bool {
        self.pmi.is_some()
    }

    /// Readiness classification, when the index is defined
    pub fn readiness(&self) -> Option<HarvestReadiness> {
        self.pmi.map(classify_readiness)
    }
}

/// Compute the Peanut Maturity Index for one sample
///
/// PMI = (orange + brown + black) / total * 100, where total sums all six
/// color classes. A sample with zero total pods yields an undefined result.
pub fn compute_maturity(counts: &PodColorCount) -> MaturityResult {
    let total = counts.total();
    if total == 0 {
        return MaturityResult { pmi: None };
    }
    // Multiply before dividing so exact ratios land exactly on the threshold.
    let pmi = counts.mature() as f64 * 100.0 / total as f64;
    MaturityResult { pmi: Some(pmi) }
}
