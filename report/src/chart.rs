//! Bar chart construction for maturity reports
//!
//! Both chart kinds are assembled as plain SVG markup: the per-sample color
//! distribution and the cross-sample PMI comparison. Identical inputs yield
//! byte-identical markup.

use std::fmt::Write as _;

use shared::models::{PodColorCount, SampleBatch, HARVEST_THRESHOLD_PERCENT};
use shared::types::ColorClass;

#[cfg(not(target_arch = "wasm32"))]
use crate::error::{ReportError, ReportResult};

/// Bar fill for samples at or above the harvest threshold
pub const READY_BAR_FILL: &str = "green";
/// Bar fill for samples below the harvest threshold
pub const NOT_READY_BAR_FILL: &str = "red";

/// Legend label for the green comparison bars
pub const LEGEND_READY_LABEL: &str = "PMI >= 70% (harvest recommended)";
/// Legend label for the red comparison bars
pub const LEGEND_NOT_READY_LABEL: &str = "PMI < 70% (await harvest)";

/// Figure and plot background tone
const FIGURE_FILL: &str = "lightgray";

const FONT_FAMILY: &str = "DejaVu Sans, sans-serif";

/// Chart canvas geometry; the defaults match the figure embedded in the
/// report document
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            margin_left: 64.0,
            margin_right: 24.0,
            margin_top: 56.0,
            margin_bottom: 88.0,
        }
    }
}

impl ChartStyle {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    fn plot_bottom(&self) -> f64 {
        self.margin_top + self.plot_height()
    }
}

struct BarRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: &'static str,
}

struct BarLabel {
    x: f64,
    y: f64,
    text: String,
}

/// Render the six-class color distribution of one sample
///
/// Bars follow the fixed class order and fills; each bar carries its count
/// above it. Sample numbering is 1-based.
pub fn color_distribution_svg(
    sample_number: usize,
    counts: &PodColorCount,
    style: &ChartStyle,
) -> String {
    let max_count = ColorClass::ALL
        .iter()
        .map(|&class| counts.count(class))
        .max()
        .unwrap_or(0)
        .max(1);
    // Headroom above the tallest bar keeps its count label inside the plot.
    let value_axis_max = f64::from(max_count) * 1.2;

    let plot_h = style.plot_height();
    let slot = style.plot_width() / 6.0;
    let bar_width = slot * 0.72;

    let mut bars = Vec::new();
    let mut count_labels = Vec::new();
    let mut axis_labels = Vec::new();

    for (index, (class, count)) in counts.counts_by_class().iter().enumerate() {
        let height = f64::from(*count) / value_axis_max * plot_h;
        let x = style.margin_left + index as f64 * slot + (slot - bar_width) / 2.0;
        let y = style.plot_bottom() - height;
        bars.push(BarRect {
            x,
            y,
            width: bar_width,
            height,
            fill: class.fill(),
        });
        count_labels.push(BarLabel {
            x: x + bar_width / 2.0,
            y: y - 6.0,
            text: count.to_string(),
        });
        axis_labels.push(BarLabel {
            x: x + bar_width / 2.0,
            y: style.plot_bottom() + 20.0,
            text: class.label().to_string(),
        });
    }

    let title = format!("Pod Color Distribution - Sample {}", sample_number);
    let mut svg = open_figure(style, &title, "Pod count");
    write_value_ticks(&mut svg, style, max_count, value_axis_max);
    write_bars(&mut svg, &bars);
    write_labels(&mut svg, &count_labels, 13, "black");
    write_labels(&mut svg, &axis_labels, 13, "black");
    svg.push_str("</svg>\n");
    svg
}

/// Render the cross-sample PMI comparison for a batch
///
/// One bar per defined sample, keeping its original 1-based number;
/// undefined samples have no bar. The value axis is fixed to 0-100.
pub fn pmi_comparison_svg(batch: &SampleBatch, style: &ChartStyle) -> String {
    let defined = batch.defined_pmi();

    let plot_h = style.plot_height();

    let mut svg = open_figure(style, "PMI Comparison Across Samples", "PMI (%)");
    write_percent_ticks(&mut svg, style);

    if defined.is_empty() {
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{}' font-size='14' fill='dimgray'>No valid samples to compare</text>",
            style.margin_left + style.plot_width() / 2.0,
            style.margin_top + plot_h / 2.0,
            FONT_FAMILY
        );
    } else {
        let slot = style.plot_width() / defined.len() as f64;
        let bar_width = (slot * 0.6).min(80.0);

        let mut bars = Vec::new();
        let mut axis_labels = Vec::new();

        for (index, (sample_number, pmi)) in defined.iter().enumerate() {
            let height = (pmi / 100.0).clamp(0.0, 1.0) * plot_h;
            let x = style.margin_left + index as f64 * slot + (slot - bar_width) / 2.0;
            let fill = if *pmi >= HARVEST_THRESHOLD_PERCENT {
                READY_BAR_FILL
            } else {
                NOT_READY_BAR_FILL
            };
            bars.push(BarRect {
                x,
                y: style.plot_bottom() - height,
                width: bar_width,
                height,
                fill,
            });
            axis_labels.push(BarLabel {
                x: x + bar_width / 2.0,
                y: style.plot_bottom() + 20.0,
                text: format!("Sample {}", sample_number),
            });
        }

        write_bars(&mut svg, &bars);
        write_labels(&mut svg, &axis_labels, 13, "black");
    }

    write_comparison_legend(&mut svg, style);
    svg.push_str("</svg>\n");
    svg
}

/// Open the SVG document: canvas, plot background, title, and the rotated
/// value-axis label
fn open_figure(style: &ChartStyle, title: &str, value_axis_label: &str) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{:.0}' height='{:.0}' viewBox='0 0 {:.0} {:.0}' role='img'>",
        style.width, style.height, style.width, style.height
    );
    let _ = writeln!(
        svg,
        "  <rect width='{:.0}' height='{:.0}' fill='{}'/>",
        style.width, style.height, FIGURE_FILL
    );
    let _ = writeln!(
        svg,
        "  <rect x='{:.1}' y='{:.1}' width='{:.1}' height='{:.1}' fill='{}' stroke='gray' stroke-width='1'/>",
        style.margin_left,
        style.margin_top,
        style.plot_width(),
        style.plot_height(),
        FIGURE_FILL
    );
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{}' font-size='18' font-weight='600'>{}</text>",
        style.width / 2.0,
        style.margin_top - 24.0,
        FONT_FAMILY,
        escape_text(title)
    );
    let axis_label_y = style.margin_top + style.plot_height() / 2.0;
    let _ = writeln!(
        svg,
        "  <text x='18' y='{:.1}' transform='rotate(-90 18 {:.1})' text-anchor='middle' font-family='{}' font-size='13'>{}</text>",
        axis_label_y,
        axis_label_y,
        FONT_FAMILY,
        escape_text(value_axis_label)
    );
    svg
}

/// Integer ticks for the count axis of the distribution chart
fn write_value_ticks(svg: &mut String, style: &ChartStyle, max_count: u32, value_axis_max: f64) {
    let step = ((f64::from(max_count) / 5.0).ceil() as u64).max(1);
    // The counter runs in u64: a u32 increment overflows once max_count
    // nears u32::MAX, and the loop would never terminate.
    let mut tick = 0u64;
    while tick <= u64::from(max_count) {
        write_tick(svg, style, tick as f64 / value_axis_max, &tick.to_string());
        tick += step;
    }
}

/// Fixed 0-100 percent ticks for the comparison chart
fn write_percent_ticks(svg: &mut String, style: &ChartStyle) {
    for tick in (0..=100).step_by(20) {
        write_tick(svg, style, f64::from(tick) / 100.0, &tick.to_string());
    }
}

fn write_tick(svg: &mut String, style: &ChartStyle, fraction: f64, text: &str) {
    let y = style.plot_bottom() - fraction * style.plot_height();
    let _ = writeln!(
        svg,
        "  <line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='gray' stroke-width='1'/>",
        style.margin_left - 4.0,
        y,
        style.margin_left,
        y
    );
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='{:.1}' text-anchor='end' font-family='{}' font-size='12'>{}</text>",
        style.margin_left - 8.0,
        y + 4.0,
        FONT_FAMILY,
        text
    );
}

fn write_bars(svg: &mut String, bars: &[BarRect]) {
    for bar in bars {
        let _ = writeln!(
            svg,
            "  <rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='{}'/>",
            bar.x, bar.y, bar.width, bar.height, bar.fill
        );
    }
}

fn write_labels(svg: &mut String, labels: &[BarLabel], font_size: u32, fill: &str) {
    for label in labels {
        let _ = writeln!(
            svg,
            "  <text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='{}' font-size='{}' fill='{}'>{}</text>",
            label.x,
            label.y,
            FONT_FAMILY,
            font_size,
            fill,
            escape_text(&label.text)
        );
    }
}

/// Two-entry legend centered under the comparison plot
fn write_comparison_legend(svg: &mut String, style: &ChartStyle) {
    let legend_y = style.plot_bottom() + 48.0;
    let origin = style.width / 2.0 - 230.0;
    let _ = writeln!(svg, "  <g transform='translate({origin:.1} {legend_y:.1})'>");
    let _ = writeln!(
        svg,
        "    <rect x='0' y='0' width='12' height='12' fill='{}'/>",
        READY_BAR_FILL
    );
    let _ = writeln!(
        svg,
        "    <text x='18' y='10' font-family='{}' font-size='12'>{}</text>",
        FONT_FAMILY,
        escape_text(LEGEND_READY_LABEL)
    );
    let _ = writeln!(
        svg,
        "    <rect x='240' y='0' width='12' height='12' fill='{}'/>",
        NOT_READY_BAR_FILL
    );
    let _ = writeln!(
        svg,
        "    <text x='258' y='10' font-family='{}' font-size='12'>{}</text>",
        FONT_FAMILY,
        escape_text(LEGEND_NOT_READY_LABEL)
    );
    let _ = writeln!(svg, "  </g>");
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rasterize chart markup to PNG at the given pixel size
///
/// Text layout depends on the fonts installed on the host; bar geometry does
/// not.
#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize_chart(svg: &str, width: u32, height: u32) -> ReportResult<Vec<u8>> {
    use resvg::render;
    use tiny_skia::{Pixmap, Transform};
    use usvg::{Options, Tree};

    tracing::debug!("Rasterizing chart at {}x{}", width, height);

    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree: Tree = Tree::from_data(svg.as_bytes(), &options)
        .map_err(|err| ReportError::ChartRender(format!("SVG parse failed: {err}")))?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| ReportError::ChartRender("pixmap allocation failed".to_string()))?;
    let mut pixmap_ref = pixmap.as_mut();
    render(&tree, Transform::default(), &mut pixmap_ref);

    pixmap
        .encode_png()
        .map_err(|err| ReportError::ChartRender(format!("PNG encode failed: {err}")))
}
