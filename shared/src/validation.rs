//! Validation utilities for the Peanut Maturity Calculator
//!
//! Sampling rules follow the Hull Scrape field protocol used by the lab.

use crate::models::{Cultivar, SampleBatch};

// ============================================================================
// Sampling Validations
// ============================================================================

/// Minimum samples per calculation run
pub const MIN_SAMPLES_PER_BATCH: usize = 1;
/// Maximum samples per calculation run
pub const MAX_SAMPLES_PER_BATCH: usize = 10;

/// Recommended pods per sample for a representative count
pub const RECOMMENDED_POD_TOTAL_MIN: u64 = 180;
pub const RECOMMENDED_POD_TOTAL_MAX: u64 = 200;

/// Validate the number of samples in a calculation run (1-10)
pub fn validate_sample_count(count: usize) -> Result<(), &'static str> {
    if count < MIN_SAMPLES_PER_BATCH {
        return Err("A calculation run needs at least one sample");
    }
    if count > MAX_SAMPLES_PER_BATCH {
        return Err("A calculation run is limited to 10 samples");
    }
    Ok(())
}

/// Validate that a batch holds an acceptable number of samples
pub fn validate_batch(batch: &SampleBatch) -> Result<(), &'static str> {
    validate_sample_count(batch.len())
}

/// Validate a cultivar selection; free-form labels must not be blank
pub fn validate_cultivar(cultivar: &Cultivar) -> Result<(), &'static str> {
    match cultivar {
        Cultivar::Other(name) if name.trim().is_empty() => Err("Cultivar name cannot be blank"),
        _ => Ok(()),
    }
}

/// Check if a sample's pod total is in the recommended range for the protocol
///
/// Takes the widened total from [`PodColorCount::total`].
///
/// [`PodColorCount::total`]: crate::models::PodColorCount::total
pub fn is_recommended_pod_total(total: u64) -> bool {
    total >= RECOMMENDED_POD_TOTAL_MIN && total <= RECOMMENDED_POD_TOTAL_MAX
}

/// Message naming a sample whose maturity is undefined (1-based numbering)
pub fn invalid_sample_message(sample_number: usize) -> String {
    format!(
        "Sample {}: no pods entered. Enter valid values.",
        sample_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PodColorCount;

    // ========================================================================
    // Sampling Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_sample_count_valid() {
        assert!(validate_sample_count(1).is_ok());
        assert!(validate_sample_count(5).is_ok());
        assert!(validate_sample_count(10).is_ok());
    }

    #[test]
    fn test_validate_sample_count_invalid() {
        assert!(validate_sample_count(0).is_err());
        assert!(validate_sample_count(11).is_err());
        assert!(validate_sample_count(100).is_err());
    }

    #[test]
    fn test_validate_batch() {
        let batch = SampleBatch::from_counts(
            Cultivar::Granoleico,
            vec![PodColorCount::new(10, 5, 5, 40, 30, 10)],
        );
        assert!(validate_batch(&batch).is_ok());

        let empty = SampleBatch::from_counts(Cultivar::Granoleico, Vec::new());
        assert!(validate_batch(&empty).is_err());

        let oversized = SampleBatch::from_counts(
            Cultivar::Granoleico,
            vec![PodColorCount::default(); 11],
        );
        assert!(validate_batch(&oversized).is_err());
    }

    #[test]
    fn test_validate_cultivar() {
        assert!(validate_cultivar(&Cultivar::Granoleico).is_ok());
        assert!(validate_cultivar(&Cultivar::Iac503).is_ok());
        assert!(validate_cultivar(&Cultivar::Other("Runner 886".to_string())).is_ok());
        assert!(validate_cultivar(&Cultivar::Other(String::new())).is_err());
        assert!(validate_cultivar(&Cultivar::Other("   ".to_string())).is_err());
    }

    #[test]
    fn test_recommended_pod_total() {
        assert!(is_recommended_pod_total(180));
        assert!(is_recommended_pod_total(190));
        assert!(is_recommended_pod_total(200));
        assert!(!is_recommended_pod_total(179));
        assert!(!is_recommended_pod_total(201));
        assert!(!is_recommended_pod_total(0));

        let sample = PodColorCount::new(30, 30, 30, 30, 30, 40);
        assert!(is_recommended_pod_total(sample.total()));
    }

    #[test]
    fn test_invalid_sample_message_numbering() {
        let message = invalid_sample_message(3);
        assert!(message.contains("Sample 3"));
        assert!(message.contains("no pods entered"));
    }
}
