use tracing::{debug, warn};

use super::LayoutOptions;
use super::geom::{Available, Region};
use super::wrap::wrap;
use crate::typeset::error::Result;
use crate::typeset::metrics::TextMeasure;

/// One wrapped line and its extent at the size it was measured at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasuredLine {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

/// The settled layout for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    pub size: u32,
    pub lines: Vec<MeasuredLine>,
    /// Gap inserted between consecutive lines.
    pub line_spacing: u32,
    /// Sum of line heights plus the gaps between them.
    pub block_height: u32,
    /// False when no size satisfied the region and the minimum size was used
    /// anyway.
    pub fitted: bool,
}

impl FitResult {
    pub fn max_line_width(&self) -> u32 {
        self.lines.iter().map(|line| line.width).max().unwrap_or(0)
    }

    fn fits(&self, available: Available) -> bool {
        self.max_line_width() <= available.width && self.block_height <= available.height
    }
}

fn line_spacing(size: u32) -> u32 {
    size / 4
}

// The min-size fallback packs lines tighter than the search does.
fn fallback_line_spacing(size: u32) -> u32 {
    size / 5
}

/// Finds the largest size in `[min_font_size, font_size]` whose wrapped block
/// fits the region's available area. When none does, the block is laid out at
/// `min_font_size` and returned with `fitted == false`.
pub fn fit<M>(measure: &M, text: &str, region: &Region, options: &LayoutOptions) -> Result<FitResult>
where
    M: TextMeasure + ?Sized,
{
    let text = text.trim();
    let available = region.available(options.margin);
    let min_size = options.min_font_size.max(1);
    let start = options.font_size.max(min_size);

    for size in (min_size..=start).rev() {
        let attempt = layout_at(measure, text, size, available.width, line_spacing(size))?;
        if attempt.fits(available) {
            debug!(
                "fit: size={} lines={} block={}x{} available={}x{}",
                size,
                attempt.lines.len(),
                attempt.max_line_width(),
                attempt.block_height,
                available.width,
                available.height
            );
            return Ok(FitResult {
                fitted: true,
                ..attempt
            });
        }
    }

    let fallback = layout_at(
        measure,
        text,
        min_size,
        available.width,
        fallback_line_spacing(min_size),
    )?;
    warn!(
        "fit: nothing fits {}x{} between {} and {}; rendering {} lines at {} ({}x{})",
        available.width,
        available.height,
        start,
        min_size,
        fallback.lines.len(),
        min_size,
        fallback.max_line_width(),
        fallback.block_height
    );
    Ok(fallback)
}

/// Wraps and measures `text` at a single size. Never reports a fit on its own.
pub(crate) fn layout_at<M>(
    measure: &M,
    text: &str,
    size: u32,
    max_width: u32,
    spacing: u32,
) -> Result<FitResult>
where
    M: TextMeasure + ?Sized,
{
    let wrapped = wrap(text, max_width, |candidate| measure.width(candidate, size))?;
    let mut lines = Vec::with_capacity(wrapped.len());
    for text in wrapped {
        let extent = measure.measure(&text, size)?;
        lines.push(MeasuredLine {
            text,
            width: extent.width,
            height: extent.height,
        });
    }
    let gaps = (lines.len().saturating_sub(1) as u32).saturating_mul(spacing);
    let block_height = lines
        .iter()
        .fold(gaps, |total, line| total.saturating_add(line.height));
    Ok(FitResult {
        size,
        lines,
        line_spacing: spacing,
        block_height,
        fitted: false,
    })
}
