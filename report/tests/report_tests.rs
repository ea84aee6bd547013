//! Tests for report layout and PDF export
//!
//! Export tests rasterize a real chart first, so they cover the full
//! chart-to-document pipeline.

#![cfg(not(target_arch = "wasm32"))]

use chrono::NaiveDate;
use report::chart::{pmi_comparison_svg, rasterize_chart, ChartStyle};
use report::document::{export_report_dated, CONTENT_TYPE, FILE_NAME};
use report::layout::{build_report_layout, Align, FontRole, TextColor};
use report::ReportError;
use shared::models::{Cultivar, PodColorCount, SampleBatch};

/// Build a pod count sample from the six class counts in display order.
fn counts(white: u32, y1: u32, y2: u32, orange: u32, brown: u32, black: u32) -> PodColorCount {
    PodColorCount::new(white, y1, y2, orange, brown, black)
}

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 14).unwrap()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Three defined samples (80%, 50%, 70%) with one empty sample in between.
fn mixed_batch() -> SampleBatch {
    SampleBatch::from_counts(
        Cultivar::Iac503,
        vec![
            counts(10, 5, 5, 40, 30, 10),
            counts(0, 0, 0, 0, 0, 0),
            counts(5, 5, 0, 5, 5, 0),
            counts(3, 0, 0, 7, 0, 0),
        ],
    )
}

// ============================================================================
// Page Layout
// ============================================================================

mod layout {
    use super::*;

    #[test]
    fn one_line_pair_per_sample() {
        let batch = mixed_batch();
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());

        assert_eq!(layout.pmi_lines().count(), 3);
        assert_eq!(layout.invalid_notice_lines().count(), 1);

        let texts: Vec<&str> = layout.lines.iter().map(|line| line.text.as_str()).collect();
        assert!(texts.contains(&"PMI: 80.00%"));
        assert!(texts.contains(&"PMI: 50.00%"));
        assert!(texts.contains(&"PMI: 70.00%"));
        assert!(texts.contains(&"Invalid (no pods entered)"));
        // Every sample keeps a header naming its number and the cultivar,
        // defined or not.
        assert!(texts.contains(&"Sample 2 - Cultivar: IAC 503"));
        assert!(texts.contains(&"Sample 4 - Cultivar: IAC 503"));
    }

    #[test]
    fn samples_appear_in_input_order() {
        let batch = mixed_batch();
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());

        let pmi_texts: Vec<&str> = layout.pmi_lines().map(|line| line.text.as_str()).collect();
        assert_eq!(pmi_texts, vec!["PMI: 80.00%", "PMI: 50.00%", "PMI: 70.00%"]);

        // Lines are laid out top to bottom.
        let mut y_values = layout.lines.iter().map(|line| line.y_mm);
        let mut previous = y_values.next().unwrap();
        for y in y_values {
            assert!(y <= previous, "line order does not descend: {} after {}", y, previous);
            previous = y;
        }
    }

    #[test]
    fn aggregate_covers_only_defined_samples() {
        let batch = mixed_batch();
        let aggregate = batch.aggregate();
        // Mean of 80, 50, and 70; the empty sample is left out.
        assert_eq!(aggregate.mean_pmi, Some(200.0 / 3.0));

        let layout = build_report_layout(&batch, &aggregate, export_date());
        let line = layout.aggregate_line().unwrap();
        assert_eq!(line.text, "Mean PMI for cultivar IAC 503: 66.67%");
        assert_eq!(line.color, TextColor::NOT_READY_RED);
        assert_eq!(line.font, FontRole::Emphasis);
    }

    #[test]
    fn ready_aggregate_is_green() {
        let batch = SampleBatch::from_counts(
            Cultivar::Granoleico,
            vec![counts(0, 0, 0, 10, 0, 0), counts(2, 0, 0, 8, 0, 0)],
        );
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());
        let line = layout.aggregate_line().unwrap();
        assert_eq!(line.text, "Mean PMI for cultivar Granoleico: 90.00%");
        assert_eq!(line.color, TextColor::READY_GREEN);
    }

    #[test]
    fn all_invalid_batch_reports_undefined_mean_in_black() {
        let batch =
            SampleBatch::from_counts(Cultivar::Granoleico, vec![counts(0, 0, 0, 0, 0, 0)]);
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());
        let line = layout.aggregate_line().unwrap();
        assert_eq!(line.text, "Mean PMI undefined (no valid samples)");
        assert_eq!(line.color, TextColor::BLACK);
    }

    #[test]
    fn page_frame_title_date_and_legend() {
        let batch = mixed_batch();
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());

        let title = &layout.lines[0];
        assert_eq!(title.text, "Peanut Maturity Report");
        assert_eq!(title.font, FontRole::Title);
        assert_eq!(title.align, Align::Center);

        assert_eq!(layout.lines[1].text, "Date: 2025-09-14");

        let legend: Vec<&str> = layout
            .lines
            .iter()
            .filter(|line| line.font == FontRole::Legend)
            .map(|line| line.text.as_str())
            .collect();
        assert_eq!(
            legend,
            vec![
                "Legend: Green = PMI >= 70% (harvest recommended)",
                "Red = PMI < 70% (await harvest)",
            ]
        );
    }

    #[test]
    fn chart_region_matches_the_fixed_page_box() {
        let batch = mixed_batch();
        let layout = build_report_layout(&batch, &batch.aggregate(), export_date());

        // 450 x 250 pt anchored at (50, 50) pt from the lower-left corner.
        let region = layout.image_region;
        assert!((region.x_mm - 17.64).abs() < 0.01);
        assert!((region.y_mm - 17.64).abs() < 0.01);
        assert!((region.width_mm - 158.75).abs() < 0.01);
        assert!((region.height_mm - 88.19).abs() < 0.01);
    }

    #[test]
    fn identical_inputs_produce_identical_layout() {
        let batch = mixed_batch();
        let aggregate = batch.aggregate();

        let snapshot = |layout: &report::ReportLayout| -> Vec<(String, u64, u64)> {
            layout
                .lines
                .iter()
                .map(|line| (line.text.clone(), line.x_mm.to_bits(), line.y_mm.to_bits()))
                .collect()
        };

        let first = build_report_layout(&batch, &aggregate, export_date());
        let second = build_report_layout(&batch, &aggregate, export_date());
        assert_eq!(snapshot(&first), snapshot(&second));
    }
}

// ============================================================================
// PDF Export
// ============================================================================

mod export {
    use super::*;

    fn chart_png(batch: &SampleBatch) -> Vec<u8> {
        let style = ChartStyle::default();
        let svg = pmi_comparison_svg(batch, &style);
        rasterize_chart(&svg, style.width as u32, style.height as u32).unwrap()
    }

    #[test]
    fn rasterized_chart_is_a_png() {
        let png = chart_png(&mixed_batch());
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn export_produces_pdf_bytes() {
        init_logging();
        let batch = mixed_batch();
        let aggregate = batch.aggregate();
        let chart = chart_png(&batch);

        let document = export_report_dated(&batch, &aggregate, &chart, export_date()).unwrap();
        assert!(document.bytes.starts_with(b"%PDF-"));
        assert!(!document.is_empty());
    }

    #[test]
    fn export_covers_both_aggregate_colors() {
        // One batch per classification, so both the green and the red mean
        // line are drawn through the PDF writer.
        let ready = SampleBatch::from_counts(
            Cultivar::Granoleico,
            vec![counts(0, 0, 0, 10, 0, 0), counts(2, 0, 0, 8, 0, 0)],
        );
        let waiting = SampleBatch::from_counts(Cultivar::Granoleico, vec![counts(8, 0, 0, 2, 0, 0)]);

        for batch in [ready, waiting] {
            let chart = chart_png(&batch);
            let document =
                export_report_dated(&batch, &batch.aggregate(), &chart, export_date()).unwrap();
            assert!(document.bytes.starts_with(b"%PDF-"));
        }
    }

    #[test]
    fn export_is_all_or_nothing_on_a_bad_image() {
        let batch = mixed_batch();
        let aggregate = batch.aggregate();

        let err = export_report_dated(&batch, &aggregate, b"not an image", export_date())
            .unwrap_err();
        assert!(matches!(err, ReportError::ImageUnavailable(_)));
    }

    #[test]
    fn empty_image_buffer_is_unavailable() {
        let batch = mixed_batch();
        let err = export_report_dated(&batch, &batch.aggregate(), &[], export_date()).unwrap_err();
        assert!(matches!(err, ReportError::ImageUnavailable(_)));
    }

    #[test]
    fn export_artifact_constants() {
        assert_eq!(FILE_NAME, "peanut_maturity_report.pdf");
        assert_eq!(CONTENT_TYPE, "application/pdf");
    }
}
