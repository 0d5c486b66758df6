use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use scanlate_typeset::{Alignment, Color};

#[derive(Parser, Debug)]
#[command(
    name = "scanlate-typeset",
    version,
    about = "Render translated text back into the text regions of an image"
)]
struct Cli {
    /// Input image path
    #[arg(short = 'i', long = "image")]
    image: PathBuf,

    /// OCR sidecar: JSON list of {"box": [x1, y1, x2, y2], "text": ...}
    #[arg(short = 'r', long = "regions")]
    regions: PathBuf,

    /// JSON list of translated strings, one per region (defaults to the OCR text)
    #[arg(short = 't', long = "translations")]
    translations: Option<PathBuf>,

    /// Path to a .ttf/.otf font for typesetting
    #[arg(short = 'f', long = "font")]
    font: Option<PathBuf>,

    /// Font size the fit search starts from
    #[arg(long = "font-size")]
    font_size: Option<u32>,

    /// Smallest font size tried before accepting overflow
    #[arg(long = "min-font-size")]
    min_font_size: Option<u32>,

    /// Inset applied to every side of a region
    #[arg(long = "margin")]
    margin: Option<u32>,

    /// Line alignment (left, center, right)
    #[arg(short = 'a', long = "align")]
    align: Option<Alignment>,

    /// Text color (#rrggbb)
    #[arg(long = "color")]
    color: Option<Color>,

    /// Paint over the regions before typesetting
    #[arg(long = "erase")]
    erase: bool,

    /// Output directory
    #[arg(short = 'o', long = "out", default_value = "out")]
    out: PathBuf,

    /// Read extra settings from a local TOML file
    #[arg(long = "read-settings")]
    read_settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    scanlate_typeset::logging::init(cli.verbose)?;

    let output = scanlate_typeset::run(scanlate_typeset::Config {
        image: cli.image,
        regions: cli.regions,
        translations: cli.translations,
        font: cli.font,
        font_size: cli.font_size,
        min_font_size: cli.min_font_size,
        margin: cli.margin,
        align: cli.align,
        text_color: cli.color,
        erase: cli.erase,
        out: cli.out,
        settings_path: cli.read_settings,
    })?;

    println!("Done. {} regions typeset.", output.rendered);
    if let Some(cleaned) = output.cleaned_image {
        println!("Cleaned: {}", cleaned.display());
    }
    println!("Final:   {}", output.final_image.display());
    println!("OCR:     {}", output.ocr_json.display());
    println!("Texts:   {}", output.translations_json.display());
    Ok(())
}
