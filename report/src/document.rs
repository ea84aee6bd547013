//! PDF document assembly
//!
//! Draws a computed [`ReportLayout`] onto a single A4 page with printpdf's
//! builtin Helvetica fonts and embeds the comparison chart image into the
//! fixed region at the page bottom.

use std::io::Cursor;

use chrono::{NaiveDate, Utc};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference, Rgb,
};
use shared::models::{AggregateResult, SampleBatch};

use crate::error::{ReportError, ReportResult};
use crate::layout::{
    build_report_layout, Align, FontRole, ImageRegion, ReportLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
    PT_TO_MM,
};

/// Fixed artifact name offered to hosts for download
pub const FILE_NAME: &str = "peanut_maturity_report.pdf";
/// MIME type of the export artifact
pub const CONTENT_TYPE: &str = "application/pdf";

/// Rendering resolution printpdf assumes for embedded images
const IMAGE_DPI: f64 = 300.0;

/// Finished report artifact; plain bytes owned by the caller
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub bytes: Vec<u8>,
}

impl ReportDocument {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Export the report stamped with today's date
pub fn export_report(
    batch: &SampleBatch,
    aggregate: &AggregateResult,
    chart_png: &[u8],
) -> ReportResult<ReportDocument> {
    export_report_dated(batch, aggregate, chart_png, Utc::now().date_naive())
}

/// Export the report with an explicit date, for reproducible output
pub fn export_report_dated(
    batch: &SampleBatch,
    aggregate: &AggregateResult,
    chart_png: &[u8],
    export_date: NaiveDate,
) -> ReportResult<ReportDocument> {
    tracing::debug!("Exporting maturity report for {} samples", batch.len());
    let layout = build_report_layout(batch, aggregate, export_date);
    render_document(&layout, chart_png)
}

fn render_document(layout: &ReportLayout, chart_png: &[u8]) -> ReportResult<ReportDocument> {
    // Decode before the page is touched; a bad image fails the export whole.
    let chart = normalize_chart_image(chart_png)?;

    let (doc, page, layer) = PdfDocument::new(
        "Peanut Maturity Report",
        mm(PAGE_WIDTH_MM),
        mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ReportError::Document(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ReportError::Document(err.to_string()))?;

    for line in &layout.lines {
        let font = if line.font.is_bold() { &bold } else { &regular };
        layer.set_fill_color(Color::Rgb(Rgb::new(
            line.color.r as f32,
            line.color.g as f32,
            line.color.b as f32,
            None,
        )));
        let x_mm = match line.align {
            Align::Left => line.x_mm,
            Align::Center => line.x_mm - approx_text_width_mm(&line.text, line.font) / 2.0,
        };
        layer.use_text(
            line.text.as_str(),
            line.font.size_pt() as f32,
            mm(x_mm),
            mm(line.y_mm),
            font,
        );
    }

    embed_chart(&layer, &layout.image_region, &chart)?;

    let bytes = doc
        .save_to_bytes()
        .map_err(|err| ReportError::Document(err.to_string()))?;
    tracing::debug!("Report document assembled ({} bytes)", bytes.len());

    Ok(ReportDocument { bytes })
}

/// Decode the chart image and re-encode as an opaque RGB PNG
///
/// The PDF writer embeds RGB data only; chart backgrounds are opaque, so
/// dropping the alpha channel loses nothing.
fn normalize_chart_image(chart_png: &[u8]) -> ReportResult<Vec<u8>> {
    let decoded = image::load_from_memory(chart_png)
        .map_err(|err| ReportError::ImageUnavailable(err.to_string()))?;
    let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, image::ImageOutputFormat::Png)
        .map_err(|err| ReportError::ImageUnavailable(err.to_string()))?;
    Ok(buffer.into_inner())
}

/// Scale the chart into the fixed page region and draw it
fn embed_chart(
    layer: &PdfLayerReference,
    region: &ImageRegion,
    rgb_png: &[u8],
) -> ReportResult<()> {
    use printpdf::image_crate::codecs::png::PngDecoder;

    let decoder = PngDecoder::new(Cursor::new(rgb_png))
        .map_err(|err| ReportError::ImageUnavailable(err.to_string()))?;
    let chart = Image::try_from(decoder)
        .map_err(|err| ReportError::ImageUnavailable(err.to_string()))?;

    let native_width_mm = chart.image.width.0 as f64 * 25.4 / IMAGE_DPI;
    let native_height_mm = chart.image.height.0 as f64 * 25.4 / IMAGE_DPI;

    chart.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(region.x_mm)),
            translate_y: Some(mm(region.y_mm)),
            scale_x: Some((region.width_mm / native_width_mm) as f32),
            scale_y: Some((region.height_mm / native_height_mm) as f32),
            dpi: Some(IMAGE_DPI as f32),
            ..Default::default()
        },
    );
    Ok(())
}

// printpdf's unit and color types are f32; layout math stays f64 up to here.
fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

// Builtin fonts expose no metrics table; 0.5 em per glyph approximates the
// Helvetica advance for centering.
fn approx_text_width_mm(text: &str, font: FontRole) -> f64 {
    text.chars().count() as f64 * font.size_pt() * 0.5 * PT_TO_MM
}
