//! Report page layout
//!
//! The page is computed as plain data before any PDF call, so hosts and
//! tests can inspect exactly what will be drawn. Identical inputs produce an
//! identical layout; the export date is the only element that varies between
//! runs, and it is an explicit parameter.

use chrono::NaiveDate;
use shared::models::{classify_readiness, AggregateResult, HarvestReadiness, SampleBatch};

use crate::chart::{LEGEND_NOT_READY_LABEL, LEGEND_READY_LABEL};

/// Page width of the A4 report
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// Page height of the A4 report
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Conversion from PostScript points to millimeters
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Font roles used on the report page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    /// Helvetica-Bold 16
    Title,
    /// Helvetica-Bold 14
    Header,
    /// Helvetica 12
    Body,
    /// Helvetica-Bold 12
    Emphasis,
    /// Helvetica 10
    Legend,
}

impl FontRole {
    pub fn size_pt(&self) -> f64 {
        match self {
            FontRole::Title => 16.0,
            FontRole::Header => 14.0,
            FontRole::Body => 12.0,
            FontRole::Emphasis => 12.0,
            FontRole::Legend => 10.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontRole::Title | FontRole::Header | FontRole::Emphasis)
    }
}

/// Horizontal anchoring of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Text color, RGB components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    /// Aggregate color when the mean classifies as harvest-ready
    pub const READY_GREEN: TextColor = TextColor {
        r: 0.0,
        g: 0.5,
        b: 0.0,
    };
    /// Aggregate color when the mean classifies as not yet ready
    pub const NOT_READY_RED: TextColor = TextColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
}

/// One positioned text line; `y_mm` measures from the page bottom
#[derive(Debug, Clone)]
pub struct TextLine {
    pub text: String,
    pub font: FontRole,
    pub align: Align,
    pub x_mm: f64,
    pub y_mm: f64,
    pub color: TextColor,
}

/// Placement of the chart image on the page
#[derive(Debug, Clone, Copy)]
pub struct ImageRegion {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Finished page layout: every text line plus the chart image region
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub lines: Vec<TextLine>,
    pub image_region: ImageRegion,
}

impl ReportLayout {
    /// Lines carrying a defined per-sample percentage
    pub fn pmi_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.lines
            .iter()
            .filter(|line| line.text.starts_with("PMI:"))
    }

    /// Lines flagging an undefined sample
    pub fn invalid_notice_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.lines
            .iter()
            .filter(|line| line.text.starts_with("Invalid"))
    }

    /// The classified aggregate line
    pub fn aggregate_line(&self) -> Option<&TextLine> {
        self.lines
            .iter()
            .find(|line| line.text.starts_with("Mean PMI"))
    }
}

/// Lay out the single report page for a batch and its aggregate
pub fn build_report_layout(
    batch: &SampleBatch,
    aggregate: &AggregateResult,
    export_date: NaiveDate,
) -> ReportLayout {
    let mut lines = Vec::new();
    let center_x = PAGE_WIDTH_MM / 2.0;
    let left_x = 50.0 * PT_TO_MM;

    lines.push(TextLine {
        text: "Peanut Maturity Report".to_string(),
        font: FontRole::Title,
        align: Align::Center,
        x_mm: center_x,
        y_mm: 800.0 * PT_TO_MM,
        color: TextColor::BLACK,
    });

    lines.push(TextLine {
        text: format!("Date: {}", export_date.format("%Y-%m-%d")),
        font: FontRole::Header,
        align: Align::Center,
        x_mm: center_x,
        y_mm: 780.0 * PT_TO_MM,
        color: TextColor::BLACK,
    });

    // Sample block: two lines per sample on a fixed 40 pt stride.
    let mut y_pt = 740.0;
    for (index, reading) in batch.readings.iter().enumerate() {
        lines.push(TextLine {
            text: format!("Sample {} - Cultivar: {}", index + 1, batch.cultivar),
            font: FontRole::Body,
            align: Align::Left,
            x_mm: left_x,
            y_mm: y_pt * PT_TO_MM,
            color: TextColor::BLACK,
        });
        let detail = match reading.result.pmi {
            Some(pmi) => format!("PMI: {:.2}%", pmi),
            None => "Invalid (no pods entered)".to_string(),
        };
        lines.push(TextLine {
            text: detail,
            font: FontRole::Body,
            align: Align::Left,
            x_mm: left_x,
            y_mm: (y_pt - 15.0) * PT_TO_MM,
            color: TextColor::BLACK,
        });
        y_pt -= 40.0;
    }

    y_pt -= 20.0;
    let (aggregate_text, aggregate_color) = match aggregate.mean_pmi {
        Some(mean) => {
            let color = match classify_readiness(mean) {
                HarvestReadiness::Ready => TextColor::READY_GREEN,
                HarvestReadiness::NotYetReady => TextColor::NOT_READY_RED,
            };
            (
                format!("Mean PMI for cultivar {}: {:.2}%", batch.cultivar, mean),
                color,
            )
        }
        None => (
            "Mean PMI undefined (no valid samples)".to_string(),
            TextColor::BLACK,
        ),
    };
    lines.push(TextLine {
        text: aggregate_text,
        font: FontRole::Emphasis,
        align: Align::Center,
        x_mm: center_x,
        y_mm: y_pt * PT_TO_MM,
        color: aggregate_color,
    });

    lines.push(TextLine {
        text: format!("Legend: Green = {}", LEGEND_READY_LABEL),
        font: FontRole::Legend,
        align: Align::Left,
        x_mm: left_x,
        y_mm: 30.0 * PT_TO_MM,
        color: TextColor::BLACK,
    });
    lines.push(TextLine {
        text: format!("Red = {}", LEGEND_NOT_READY_LABEL),
        font: FontRole::Legend,
        align: Align::Left,
        x_mm: left_x,
        y_mm: 20.0 * PT_TO_MM,
        color: TextColor::BLACK,
    });

    ReportLayout {
        lines,
        image_region: ImageRegion {
            x_mm: 50.0 * PT_TO_MM,
            y_mm: 50.0 * PT_TO_MM,
            width_mm: 450.0 * PT_TO_MM,
            height_mm: 250.0 * PT_TO_MM,
        },
    }
}
