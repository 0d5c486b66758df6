use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::typeset::Region;

/// One recognized text region as written by the OCR stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    #[serde(rename = "box")]
    pub region: Region,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

pub fn load_text_boxes(path: &Path) -> Result<Vec<TextBox>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read regions: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse regions: {}", path.display()))
}

pub fn load_translations(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read translations: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse translations: {}", path.display()))
}

/// Writes `value` as pretty-printed UTF-8 JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).with_context(|| "failed to encode JSON")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Pairs each region with the text to render into it: the translation at the
/// same position when translations are given, otherwise the recognized text.
/// Unpaired entries on either side are dropped.
pub fn pair_texts(boxes: &[TextBox], translations: Option<&[String]>) -> Vec<(Region, String)> {
    match translations {
        Some(translations) => boxes
            .iter()
            .zip(translations)
            .map(|(entry, text)| (entry.region, text.clone()))
            .collect(),
        None => boxes
            .iter()
            .map(|entry| (entry.region, entry.text.clone()))
            .collect(),
    }
}
