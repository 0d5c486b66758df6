use super::fit::FitResult;
use super::geom::Region;
use super::Alignment;
use crate::typeset::canvas::Canvas;
use crate::typeset::error::Result;

/// A line with its final top-left origin on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Computes line origins: the block is centered vertically in the available
/// area and each line is positioned horizontally by `align`.
pub fn layout_lines(region: &Region, fit: &FitResult, align: Alignment, margin: u32) -> Vec<PlacedLine> {
    let available = region.available(margin);
    let margin = margin as i64;
    let slack_y = available.height as i64 - fit.block_height as i64;
    let mut y = region.y1 as i64 + margin + (slack_y / 2).max(0);

    let mut placed = Vec::with_capacity(fit.lines.len());
    for line in &fit.lines {
        let width = line.width as i64;
        let x = match align {
            Alignment::Center => {
                let slack_x = available.width as i64 - width;
                region.x1 as i64 + margin + (slack_x / 2).max(0)
            }
            Alignment::Right => region.x2 as i64 - margin - width,
            Alignment::Left => region.x1 as i64 + margin,
        };
        placed.push(PlacedLine {
            text: line.text.clone(),
            x: to_px(x),
            y: to_px(y),
            width: line.width,
            height: line.height,
        });
        y += line.height as i64 + fit.line_spacing as i64;
    }
    placed
}

/// Draws every line of `fit` into `region`. Blank lines take up their height
/// but draw nothing.
pub fn place<C>(
    canvas: &mut C,
    region: &Region,
    fit: &FitResult,
    align: Alignment,
    margin: u32,
) -> Result<Vec<PlacedLine>>
where
    C: Canvas + ?Sized,
{
    let placed = layout_lines(region, fit, align, margin);
    for line in &placed {
        if line.text.is_empty() {
            continue;
        }
        canvas.draw_text(line, fit.size)?;
    }
    Ok(placed)
}

fn to_px(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
