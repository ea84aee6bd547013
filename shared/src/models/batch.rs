//! Sample batch models and aggregation

use serde::{Deserialize, Serialize};

use super::cultivar::Cultivar;
use super::maturity::{classify_readiness, compute_maturity, HarvestReadiness, MaturityResult};
use super::sample::PodColorCount;

/// One counted sample together with its computed maturity result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReading {
    pub counts: PodColorCount,
    pub result: MaturityResult,
}

impl SampleReading {
    pub fn new(counts: PodColorCount) -> Self {
        let result = compute_maturity(&counts);
        Self { counts, result }
    }
}

/// An ordered batch of samples for one cultivar, built per calculation run
///
/// Batches are caller-owned and never persisted; hosts assemble one, export
/// its report, and drop it. Sample numbering is 1-based everywhere a sample
/// is shown to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleBatch {
    pub cultivar: Cultivar,
    pub readings: Vec<SampleReading>,
}

impl SampleBatch {
    /// Build a batch by computing the maturity result of every sample
    pub fn from_counts(
        cultivar: Cultivar,
        counts: impl IntoIterator<Item = PodColorCount>,
    ) -> Self {
        let readings = counts.into_iter().map(SampleReading::new).collect();
        Self { cultivar, readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Defined PMI values paired with their 1-based sample numbers
    pub fn defined_pmi(&self) -> Vec<(usize, f64)> {
        self.readings
            .iter()
            .enumerate()
            .filter_map(|(idx, reading)| reading.result.pmi.map(|pmi| (idx + 1, pmi)))
            .collect()
    }

    pub fn aggregate(&self) -> AggregateResult {
        aggregate(&self.readings)
    }
}

/// Mean maturity across the defined samples of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    /// Arithmetic mean of the defined per-sample PMIs, if any are defined
    pub mean_pmi: Option<f64>,
}

impl AggregateResult {
    pub fn is_defined(&self) -> bool {
        self.mean_pmi.is_some()
    }

    /// Readiness classification of the mean, when defined
    pub fn readiness(&self) -> Option<HarvestReadiness> {
        self.mean_pmi.map(classify_readiness)
    }
}

/// Mean of the defined per-sample percentages
///
/// Undefined samples are excluded, never counted as zero. A batch with no
/// defined sample has an undefined aggregate.
pub fn aggregate(readings: &[SampleReading]) -> AggregateResult {
    let defined: Vec<f64> = readings.iter().filter_map(|r| r.result.pmi).collect();
    if defined.is_empty() {
        return AggregateResult { mean_pmi: None };
    }
    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    AggregateResult {
        mean_pmi: Some(mean),
    }
}
