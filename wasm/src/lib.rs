//! WebAssembly module for the Peanut Maturity Calculator
//!
//! Provides client-side computation for:
//! - Per-sample PMI calculation and classification
//! - Batch summaries with the aggregate mean
//! - Chart markup for live preview
//! - Offline input validation

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use report::chart::{color_distribution_svg, pmi_comparison_svg, ChartStyle};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Calculate the PMI percentage for one sample; an empty sample has none
#[wasm_bindgen]
pub fn calculate_pmi(
    white: u32,
    yellow_stage1: u32,
    yellow_stage2: u32,
    orange: u32,
    brown: u32,
    black: u32,
) -> Option<f64> {
    let sample = PodColorCount::new(white, yellow_stage1, yellow_stage2, orange, brown, black);
    compute_maturity(&sample).pmi
}

/// Classify a defined PMI percentage against the harvest threshold
#[wasm_bindgen]
pub fn classify_pmi(pmi_percent: f64) -> String {
    format!("{}", classify_readiness(pmi_percent))
}

/// Field recommendation for a defined PMI percentage
#[wasm_bindgen]
pub fn harvest_recommendation(pmi_percent: f64) -> String {
    classify_readiness(pmi_percent).recommendation().to_string()
}

#[derive(Serialize)]
struct SampleSummary {
    sample_number: usize,
    pmi: Option<f64>,
    readiness: Option<String>,
    recommendation: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
struct BatchSummary {
    cultivar: String,
    samples: Vec<SampleSummary>,
    mean_pmi: Option<f64>,
    mean_readiness: Option<String>,
}

/// Summarize a calculation run from a JSON array of pod counts
///
/// Returns a JSON object with one entry per sample in input order plus the
/// aggregate mean over the defined samples.
#[wasm_bindgen]
pub fn summarize_batch(samples_json: &str, cultivar_json: &str) -> Result<String, JsValue> {
    let samples: Vec<PodColorCount> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;
    let cultivar: Cultivar = serde_json::from_str(cultivar_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid cultivar JSON: {}", e)))?;

    let batch = SampleBatch::from_counts(cultivar, samples);
    validate_batch(&batch).map_err(JsValue::from_str)?;

    let aggregate = batch.aggregate();
    let samples = batch
        .readings
        .iter()
        .enumerate()
        .map(|(index, reading)| {
            let sample_number = index + 1;
            let readiness = reading.result.readiness();
            SampleSummary {
                sample_number,
                pmi: reading.result.pmi,
                readiness: readiness.map(|r| r.to_string()),
                recommendation: readiness.map(|r| r.recommendation().to_string()),
                message: if reading.result.is_defined() {
                    None
                } else {
                    Some(invalid_sample_message(sample_number))
                },
            }
        })
        .collect();

    let summary = BatchSummary {
        cultivar: batch.cultivar.to_string(),
        samples,
        mean_pmi: aggregate.mean_pmi,
        mean_readiness: aggregate.readiness().map(|r| r.to_string()),
    };

    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Color distribution chart markup for one sample (1-based numbering)
#[wasm_bindgen]
pub fn distribution_chart_svg(sample_json: &str, sample_number: u32) -> Result<String, JsValue> {
    let sample: PodColorCount = serde_json::from_str(sample_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid sample JSON: {}", e)))?;
    Ok(color_distribution_svg(
        sample_number as usize,
        &sample,
        &ChartStyle::default(),
    ))
}

/// PMI comparison chart markup for a calculation run
#[wasm_bindgen]
pub fn comparison_chart_svg(samples_json: &str, cultivar_json: &str) -> Result<String, JsValue> {
    let samples: Vec<PodColorCount> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;
    let cultivar: Cultivar = serde_json::from_str(cultivar_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid cultivar JSON: {}", e)))?;

    let batch = SampleBatch::from_counts(cultivar, samples);
    Ok(pmi_comparison_svg(&batch, &ChartStyle::default()))
}

/// Validate a proposed number of samples for one calculation run
#[wasm_bindgen]
pub fn validate_batch_size(count: u32) -> bool {
    validate_sample_count(count as usize).is_ok()
}

/// Check a sample's pod total against the recommended field-protocol range
#[wasm_bindgen]
pub fn pod_total_in_recommended_range(total: u32) -> bool {
    is_recommended_pod_total(u64::from(total))
}
