//! Pod count sample models

use serde::{Deserialize, Serialize};

use crate::types::ColorClass;

/// Pod counts for one field sample, one bucket per color class
///
/// Counts are unsigned, so "all counts are non-negative" holds by
/// construction. The calculator places no upper bound on a sample; the
/// recommended 180-200 pods per sample is an advisory check only
/// (see [`crate::validation::is_recommended_pod_total`]).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodColorCount {
    pub white: u32,
    pub yellow_stage1: u32,
    pub yellow_stage2: u32,
    pub orange: u32,
    pub brown: u32,
    pub black: u32,
}

impl PodColorCount {
    pub fn new(
        white: u32,
        yellow_stage1: u32,
        yellow_stage2: u32,
        orange: u32,
        brown: u32,
        black: u32,
    ) -> Self {
        Self {
            white,
            yellow_stage1,
            yellow_stage2,
            orange,
            brown,
            black,
        }
    }

    /// Total pods counted in this sample
    ///
    /// Summed in u64; six full u32 buckets cannot overflow it.
    pub fn total(&self) -> u64 {
        u64::from(self.white)
            + u64::from(self.yellow_stage1)
            + u64::from(self.yellow_stage2)
            + u64::from(self.orange)
            + u64::from(self.brown)
            + u64::from(self.black)
    }

    /// Pods in the mature color classes (orange, brown, black)
    pub fn mature(&self) -> u64 {
        u64::from(self.orange) + u64::from(self.brown) + u64::from(self.black)
    }

    pub fn count(&self, class: ColorClass) -> u32 {
        match class {
            ColorClass::White => self.white,
            ColorClass::YellowStage1 => self.yellow_stage1,
            ColorClass::YellowStage2 => self.yellow_stage2,
            ColorClass::Orange => self.orange,
            ColorClass::Brown => self.brown,
            ColorClass::Black => self.black,
        }
    }

    /// Counts paired with their class, in chart order
    pub fn counts_by_class(&self) -> [(ColorClass, u32); 6] {
        ColorClass::ALL.map(|class| (class, self.count(class)))
    }
}
