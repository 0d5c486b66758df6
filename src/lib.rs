use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod erase;
pub mod logging;
pub mod settings;
pub mod sidecar;
pub mod typeset;

mod test_util;

pub use typeset::{
    Alignment, Canvas, Color, FitResult, FontFace, LayoutOptions, Region, TextMeasure,
    TypesetError, draw_text_in_box, paste_texts,
};

pub const CLEANED_IMAGE_NAME: &str = "cleaned_image.png";
pub const FINAL_IMAGE_NAME: &str = "final_image.png";
pub const OCR_JSON_NAME: &str = "ocr.json";
pub const TRANSLATIONS_JSON_NAME: &str = "translations.json";

/// One typesetting run over a single image. `None` fields fall back to the
/// loaded settings.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub image: PathBuf,
    pub regions: PathBuf,
    pub translations: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub font_size: Option<u32>,
    pub min_font_size: Option<u32>,
    pub margin: Option<u32>,
    pub align: Option<Alignment>,
    pub text_color: Option<Color>,
    pub erase: bool,
    pub out: PathBuf,
    pub settings_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub cleaned_image: Option<PathBuf>,
    pub final_image: PathBuf,
    /// Copy of the regions that were read.
    pub ocr_json: PathBuf,
    /// The strings that were rendered, one per region.
    pub translations_json: PathBuf,
    pub rendered: usize,
}

pub fn run(config: Config) -> Result<RunOutput> {
    let settings = settings::load_settings(config.settings_path.as_deref())?;

    let font_path = config
        .font
        .clone()
        .or_else(|| settings.font_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow!("--font is required for typesetting. Provide a TTF/OTF font path.")
        })?;
    let font = FontFace::load(&font_path)?;
    info!("font: {} ({})", font.family(), font.path().display());

    let options = resolve_layout_options(&config, &settings);
    let color = config.text_color.unwrap_or(settings.text_color);

    fs::create_dir_all(&config.out)
        .with_context(|| format!("failed to create output directory: {}", config.out.display()))?;

    let mut background = image::open(&config.image)
        .with_context(|| format!("failed to load image: {}", config.image.display()))?
        .to_rgba8();
    info!(
        "image: {} ({}x{})",
        config.image.display(),
        background.width(),
        background.height()
    );

    let boxes = sidecar::load_text_boxes(&config.regions)?;
    let translations = match config.translations.as_deref() {
        Some(path) => Some(sidecar::load_translations(path)?),
        None => None,
    };
    if let Some(translations) = translations.as_ref() {
        if translations.len() != boxes.len() {
            warn!(
                "{} regions but {} translations; extra entries are ignored",
                boxes.len(),
                translations.len()
            );
        }
    }
    let pairs = sidecar::pair_texts(&boxes, translations.as_deref());
    let (regions, texts): (Vec<Region>, Vec<String>) = pairs.into_iter().unzip();

    let ocr_json = config.out.join(OCR_JSON_NAME);
    sidecar::write_json(&ocr_json, &boxes)?;
    let translations_json = config.out.join(TRANSLATIONS_JSON_NAME);
    sidecar::write_json(&translations_json, &texts)?;

    let cleaned_image = if config.erase {
        let painted = erase::erase_regions(&mut background, &regions, settings.erase_fill_color);
        let path = config.out.join(CLEANED_IMAGE_NAME);
        save_image(&background, &path)?;
        info!("erase: {} regions -> {}", painted, path.display());
        Some(path)
    } else {
        None
    };

    let rendered = paste_texts(&background, &font, &regions, &texts, &options, color)?;
    let final_image = config.out.join(FINAL_IMAGE_NAME);
    save_image(&rendered, &final_image)?;
    info!("typeset: {} regions -> {}", regions.len(), final_image.display());

    Ok(RunOutput {
        cleaned_image,
        final_image,
        ocr_json,
        translations_json,
        rendered: regions.len(),
    })
}

fn resolve_layout_options(config: &Config, settings: &settings::Settings) -> LayoutOptions {
    let defaults = settings.layout_options();
    LayoutOptions {
        font_size: config.font_size.unwrap_or(defaults.font_size),
        min_font_size: config.min_font_size.unwrap_or(defaults.min_font_size),
        margin: config.margin.unwrap_or(defaults.margin),
        align: config.align.unwrap_or(defaults.align),
    }
}

fn save_image(image: &image::RgbaImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write image: {}", path.display()))
}
