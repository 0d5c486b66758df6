mod fit;
mod geom;
mod place;
mod wrap;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fit::{FitResult, MeasuredLine, fit};
pub use geom::{Available, Region};
pub use place::{PlacedLine, layout_lines, place};
pub use wrap::{WrapMode, classify, wrap};

/// Horizontal position of each line inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Error)]
#[error("unknown alignment '{0}' (expected left, center or right)")]
pub struct ParseAlignmentError(String);

impl FromStr for Alignment {
    type Err = ParseAlignmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(ParseAlignmentError(value.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

/// Knobs shared by the fitter and the placer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Size the search starts from.
    pub font_size: u32,
    /// Smallest size tried; also the fallback size.
    pub min_font_size: u32,
    /// Inset applied to all four sides of a region.
    pub margin: u32,
    pub align: Alignment,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            font_size: 28,
            min_font_size: 8,
            margin: 4,
            align: Alignment::Center,
        }
    }
}
