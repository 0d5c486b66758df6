//! Box-constrained text layout: wrap a string to a width, shrink the font
//! until the block fits a region, then place and draw each line.

mod canvas;
mod engine;
mod error;
mod font;
mod metrics;
mod render;

pub use canvas::{Canvas, Color, DrawCall, ParseColorError, PixmapCanvas, RecordingCanvas};
pub use engine::{
    Alignment, Available, FitResult, LayoutOptions, MeasuredLine, ParseAlignmentError,
    PlacedLine, Region, WrapMode, classify, fit, layout_lines, place, wrap,
};
pub use error::{Result, TypesetError};
pub use font::FontFace;
pub use metrics::{FixedMetrics, TextExtent, TextMeasure};
pub use render::{draw_text_in_box, paste_texts};
