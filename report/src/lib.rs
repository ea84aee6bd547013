//! Chart construction and report export for the Peanut Maturity Calculator
//!
//! Turns a computed [`shared::SampleBatch`] into a single-page PDF report:
//! header, per-sample results, classified aggregate, embedded comparison
//! chart, and a fixed legend. Charts are laid out as SVG text so the browser
//! host can display them without a rasterizer; native targets rasterize the
//! same markup for PDF embedding.

pub mod chart;
pub mod error;
pub mod layout;

#[cfg(not(target_arch = "wasm32"))]
pub mod document;

pub use chart::{color_distribution_svg, pmi_comparison_svg, ChartStyle};
pub use error::{ReportError, ReportResult};
pub use layout::{build_report_layout, ReportLayout};

#[cfg(not(target_arch = "wasm32"))]
pub use chart::rasterize_chart;
#[cfg(not(target_arch = "wasm32"))]
pub use document::{export_report, export_report_dated, ReportDocument, CONTENT_TYPE, FILE_NAME};
