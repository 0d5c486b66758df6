use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::render;
use thiserror::Error;
use tiny_skia::{ColorU8, Pixmap, Transform};
use usvg::{Options, Tree, fontdb};

use super::engine::PlacedLine;
use super::error::{Result, TypesetError};
use super::font::FontFace;

/// Destination for placed lines.
pub trait Canvas {
    /// Draws `line.text` with its line box's top-left corner at `(line.x, line.y)`.
    fn draw_text(&mut self, line: &PlacedLine, size: u32) -> Result<()>;
}

/// Opaque RGB color written as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

#[derive(Debug, Error)]
#[error("invalid color '{0}' (expected #rrggbb or #rgb)")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseColorError(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => Ok(Color {
                r: channel(&hex[0..1])? * 17,
                g: channel(&hex[1..2])? * 17,
                b: channel(&hex[2..3])? * 17,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Raster canvas seeded from a background image.
///
/// Each line is rendered as a one-line SVG through resvg, using only the font
/// it was created with.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    font: FontFace,
    options: Options<'static>,
    color: Color,
}

impl PixmapCanvas {
    pub fn new(background: &RgbaImage, font: &FontFace, color: Color) -> Result<Self> {
        let pixmap = to_pixmap(background)?;
        let mut db = fontdb::Database::new();
        db.load_font_data(font.data().to_vec());
        let options = Options {
            fontdb: Arc::new(db),
            font_family: font.family().to_string(),
            ..Options::default()
        };
        Ok(Self {
            pixmap,
            font: font.clone(),
            options,
            color,
        })
    }

    pub fn into_image(self) -> RgbaImage {
        to_image(&self.pixmap)
    }
}

impl Canvas for PixmapCanvas {
    fn draw_text(&mut self, line: &PlacedLine, size: u32) -> Result<()> {
        // leave room for glyphs whose ink runs past their advance
        let width = line.width.max(1).saturating_add(size);
        let height = line.height.max(1);
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="0" y="{baseline}" font-family="{family}" font-size="{size}" fill="{fill}" xml:space="preserve">{text}</text></svg>"#,
            w = width,
            h = height,
            baseline = self.font.ascent_px(size),
            family = escape_xml(self.font.family()),
            size = size,
            fill = self.color,
            text = escape_xml(&line.text)
        );
        let tree = Tree::from_str(&svg, &self.options)
            .map_err(|err| TypesetError::Svg(err.to_string()))?;
        let transform = Transform::from_translate(line.x as f32, line.y as f32);
        let mut pixmap_mut = self.pixmap.as_mut();
        render(&tree, transform, &mut pixmap_mut);
        Ok(())
    }
}

/// One recorded `draw_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub line: PlacedLine,
    pub size: u32,
}

/// Canvas that only remembers what it was asked to draw. Handy for dry runs.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl Canvas for RecordingCanvas {
    fn draw_text(&mut self, line: &PlacedLine, size: u32) -> Result<()> {
        self.calls.push(DrawCall {
            line: line.clone(),
            size,
        });
        Ok(())
    }
}

fn to_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        TypesetError::Canvas(format!("cannot allocate a {}x{} canvas", width, height))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "#c40000".parse::<Color>().unwrap(),
            Color { r: 0xc4, g: 0, b: 0 }
        );
        assert!("c40000".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn color_displays_as_hex() {
        assert_eq!(Color { r: 1, g: 171, b: 255 }.to_string(), "#01abff");
    }

    #[test]
    fn opaque_pixels_survive_the_pixmap() {
        let mut image = RgbaImage::new(3, 2);
        for (idx, pixel) in image.pixels_mut().enumerate() {
            *pixel = Rgba([idx as u8 * 40, 200, 7, 255]);
        }
        let pixmap = to_pixmap(&image).unwrap();
        assert_eq!(to_image(&pixmap), image);
    }

    #[test]
    fn empty_background_is_rejected() {
        let image = RgbaImage::new(0, 10);
        assert!(matches!(to_pixmap(&image), Err(TypesetError::Canvas(_))));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::default();
        for (idx, text) in ["one", "two"].iter().enumerate() {
            let line = PlacedLine {
                text: text.to_string(),
                x: 0,
                y: idx as i32 * 10,
                width: 30,
                height: 10,
            };
            canvas.draw_text(&line, 12).unwrap();
        }
        assert_eq!(canvas.calls.len(), 2);
        assert_eq!(canvas.calls[1].line.text, "two");
    }
}
