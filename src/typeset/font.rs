use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ttf_parser::Face;
use ttf_parser::name_id;

use super::error::{Result, TypesetError};
use super::metrics::{TextExtent, TextMeasure};

/// A parsed font file plus the metrics the layout engine needs.
///
/// Horizontal advances are read once at load, so measuring never re-parses the
/// font. The raw bytes and the advance table are shared, so clones are cheap
/// and can cross threads.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    advances: Arc<HashMap<char, u16>>,
    path: PathBuf,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    space_advance: u16,
    family: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("path", &self.path)
            .field("family", &self.family)
            .field("units_per_em", &self.units_per_em)
            .field("glyphs", &self.advances.len())
            .finish()
    }
}

impl FontFace {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| TypesetError::FontLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(data, path)
    }

    /// Parses the first usable face of a font file or collection. `origin` is
    /// only used to label errors.
    pub fn from_data(data: Vec<u8>, origin: &Path) -> Result<Self> {
        let count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
        let mut last_error = None;
        for index in 0..count {
            let face = match Face::parse(&data, index) {
                Ok(face) => face,
                Err(err) => {
                    last_error = Some(err.to_string());
                    continue;
                }
            };
            let units_per_em = face.units_per_em().max(1);
            let space_advance = face
                .glyph_index(' ')
                .and_then(|id| face.glyph_hor_advance(id))
                .unwrap_or(units_per_em / 2);
            let family = extract_family_name(&face)
                .ok_or_else(|| TypesetError::MissingFamily(origin.to_path_buf()))?;
            let ascender = face.ascender();
            let descender = face.descender();
            let advances = collect_advances(&face);
            return Ok(Self {
                data: Arc::new(data),
                advances: Arc::new(advances),
                path: origin.to_path_buf(),
                units_per_em,
                ascender,
                descender,
                space_advance,
                family,
            });
        }
        Err(TypesetError::FontParse {
            path: origin.to_path_buf(),
            reason: last_error.unwrap_or_else(|| "no faces in font".to_string()),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distance in pixels from the top of a line box to the baseline.
    pub fn ascent_px(&self, size: u32) -> f32 {
        self.ascender.max(0) as f32 * size as f32 / self.units_per_em as f32
    }

    fn line_height_px(&self, size: u32) -> u32 {
        let units = (self.ascender as i32 - self.descender as i32).max(1) as u64;
        scale_up(units, size, self.units_per_em)
    }
}

impl TextMeasure for FontFace {
    fn measure(&self, text: &str, size: u32) -> Result<TextExtent> {
        let mut advance = 0u64;
        for ch in text.chars() {
            let glyph = self.advances.get(&ch).copied();
            let units = char_advance(ch, glyph, self.space_advance)
                .ok_or(TypesetError::UnmeasurableGlyph { ch, size })?;
            advance = advance.saturating_add(units as u64);
        }
        Ok(TextExtent {
            width: scale_up(advance, size, self.units_per_em),
            height: self.line_height_px(size),
        })
    }
}

// every char the unicode cmap subtables map, with its horizontal advance
fn collect_advances(face: &Face<'_>) -> HashMap<char, u16> {
    let mut advances = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return advances;
    };
    for subtable in cmap.subtables {
        if !subtable.is_unicode() {
            continue;
        }
        subtable.codepoints(|code| {
            let Some(ch) = char::from_u32(code) else {
                return;
            };
            if advances.contains_key(&ch) {
                return;
            }
            if let Some(glyph) = face.glyph_index(ch) {
                advances.insert(ch, face.glyph_hor_advance(glyph).unwrap_or(0));
            }
        });
    }
    advances
}

// a space the font has no glyph for still advances; anything else is unmeasurable
fn char_advance(ch: char, glyph_advance: Option<u16>, space_advance: u16) -> Option<u16> {
    match glyph_advance {
        Some(units) => Some(units),
        None if ch == ' ' => Some(space_advance),
        None => None,
    }
}

// font units -> pixels, rounded up so a measured line never understates its ink
fn scale_up(units: u64, size: u32, units_per_em: u16) -> u32 {
    let upem = units_per_em.max(1) as u64;
    let px = (units * size as u64).div_ceil(upem);
    px.min(u32::MAX as u64) as u32
}

fn extract_family_name(face: &Face<'_>) -> Option<String> {
    let mut fallback = None;
    for name in face.names() {
        if name.name_id == name_id::TYPOGRAPHIC_FAMILY {
            if let Some(value) = name.to_string() {
                return Some(value);
            }
        } else if name.name_id == name_id::FAMILY && fallback.is_none() {
            fallback = name.to_string();
        }
    }
    fallback
}
