use image::RgbaImage;
use tracing::debug;

use super::canvas::{Canvas, Color, PixmapCanvas};
use super::engine::{FitResult, LayoutOptions, Region, fit, place};
use super::error::Result;
use super::font::FontFace;
use super::metrics::TextMeasure;

/// Fits `text` into `region` and draws it onto `canvas`.
pub fn draw_text_in_box<C, M>(
    canvas: &mut C,
    measure: &M,
    region: &Region,
    text: &str,
    options: &LayoutOptions,
) -> Result<FitResult>
where
    C: Canvas + ?Sized,
    M: TextMeasure + ?Sized,
{
    let fitted = fit(measure, text, region, options)?;
    place(canvas, region, &fitted, options.align, options.margin)?;
    Ok(fitted)
}

/// Renders each text into its region, in order, on a copy of `background`.
///
/// Regions and texts are paired positionally; whichever list is longer has
/// its extra entries ignored.
pub fn paste_texts(
    background: &RgbaImage,
    font: &FontFace,
    regions: &[Region],
    texts: &[String],
    options: &LayoutOptions,
    color: Color,
) -> Result<RgbaImage> {
    let mut canvas = PixmapCanvas::new(background, font, color)?;
    for (idx, (region, text)) in regions.iter().zip(texts).enumerate() {
        let fitted = draw_text_in_box(&mut canvas, font, region, text, options)?;
        debug!(
            "region {}: size={} lines={} fitted={}",
            idx,
            fitted.size,
            fitted.lines.len(),
            fitted.fitted
        );
    }
    Ok(canvas.into_image())
}
