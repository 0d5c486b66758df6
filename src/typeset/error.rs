use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the layout core.
///
/// "Text does not fit" is never an error: the fitter resolves it by shrinking
/// and, as a last resort, rendering at the minimum size.
#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("failed to read font: {path}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font: {path} ({reason})")]
    FontParse { path: PathBuf, reason: String },

    #[error("font has no family name: {0}")]
    MissingFamily(PathBuf),

    #[error("no glyph for {ch:?} at size {size}")]
    UnmeasurableGlyph { ch: char, size: u32 },

    #[error("failed to build text overlay: {0}")]
    Svg(String),

    #[error("canvas error: {0}")]
    Canvas(String),
}

pub type Result<T> = std::result::Result<T, TypesetError>;
