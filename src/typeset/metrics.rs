use super::error::Result;

/// Pixel extent of a run of text at one font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Measurement capability used by the wrapper, fitter and placer.
///
/// Implementations must be deterministic: the same text at the same size
/// always yields the same extent.
pub trait TextMeasure {
    fn measure(&self, text: &str, size: u32) -> Result<TextExtent>;

    fn width(&self, text: &str, size: u32) -> Result<u32> {
        self.measure(text, size).map(|extent| extent.width)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, size: u32) -> Result<TextExtent> {
        (**self).measure(text, size)
    }
}

/// Monospaced metric table: every character is `advance` wide and every line
/// is `line_height` tall, whatever the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    pub advance: u32,
    pub line_height: u32,
}

impl FixedMetrics {
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str, _size: u32) -> Result<TextExtent> {
        let count = text.chars().count() as u32;
        Ok(TextExtent {
            width: count.saturating_mul(self.advance),
            height: self.line_height,
        })
    }
}
