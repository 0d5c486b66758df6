use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::typeset::{Alignment, Color, LayoutOptions};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub font_size: u32,
    pub min_font_size: u32,
    pub margin: u32,
    pub align: Alignment,
    pub text_color: Color,
    pub font_path: Option<String>,
    pub erase_fill_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            font_size: layout.font_size,
            min_font_size: layout.min_font_size,
            margin: layout.margin,
            align: layout.align,
            text_color: Color::BLACK,
            font_path: None,
            erase_fill_color: Color::WHITE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    typeset: Option<TypesetSettings>,
    erase: Option<EraseSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct TypesetSettings {
    font_size: Option<i64>,
    min_font_size: Option<i64>,
    margin: Option<i64>,
    align: Option<String>,
    text_color: Option<String>,
    font_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EraseSettings {
    fill_color: Option<String>,
}

/// Resolves the typesetting defaults that `run` falls back to when a flag is
/// not given.
///
/// Each file may carry a `[typeset]` table (sizes, margin, alignment, text
/// color, font path) and an `[erase]` table (fill color); keys a file leaves
/// out keep the value from earlier files. The home file is seeded from the
/// bundled `settings.toml` on first use, so the crate defaults are always on
/// disk to edit. A later file wins over:
///
/// 1. `settings.toml`, then `settings.local.toml`, in the working directory
/// 2. `settings.toml`, then `settings.local.toml`, in `$HOME/.scanlate-typeset`
/// 3. `extra_path`, which must exist
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    ensure_home_settings_file()?;

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings
                .merge(parsed)
                .with_context(|| format!("invalid settings: {}", path.display()))?;
        }
    }

    Ok(settings)
}

impl Settings {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            font_size: self.font_size,
            min_font_size: self.min_font_size,
            margin: self.margin,
            align: self.align,
        }
    }

    fn merge(&mut self, incoming: SettingsFile) -> Result<()> {
        if let Some(typeset) = incoming.typeset {
            if let Some(size) = positive(typeset.font_size) {
                self.font_size = size;
            }
            if let Some(size) = positive(typeset.min_font_size) {
                self.min_font_size = size;
            }
            if let Some(margin) = typeset.margin {
                if margin >= 0 {
                    self.margin = u32::try_from(margin).unwrap_or(u32::MAX);
                }
            }
            if let Some(align) = non_blank(typeset.align) {
                self.align = align.parse()?;
            }
            if let Some(color) = non_blank(typeset.text_color) {
                self.text_color = color.parse()?;
            }
            if let Some(path) = non_blank(typeset.font_path) {
                self.font_path = Some(path);
            }
        }
        if let Some(erase) = incoming.erase {
            if let Some(color) = non_blank(erase.fill_color) {
                self.erase_fill_color = color.parse()?;
            }
        }
        Ok(())
    }
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|value| *value > 0)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn ensure_home_settings_file() -> Result<()> {
    let Some(home) = home_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("failed to create settings directory: {}", home.display()))?;
    let path = home.join("settings.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_SETTINGS_TOML)
            .with_context(|| format!("failed to write settings: {}", path.display()))?;
    }
    Ok(())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".scanlate-typeset"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::with_temp_home;
    use tempfile::tempdir;

    fn merged(toml_text: &str) -> Result<Settings> {
        let mut settings = Settings::default();
        let parsed: SettingsFile = toml::from_str(toml_text)?;
        settings.merge(parsed)?;
        Ok(settings)
    }

    #[test]
    fn bundled_defaults_match_default_settings() {
        assert_eq!(merged(DEFAULT_SETTINGS_TOML).unwrap(), Settings::default());
    }

    #[test]
    fn invalid_numbers_are_ignored() {
        let settings = merged("[typeset]\nfont_size = 0\nmin_font_size = -3\nmargin = -1\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bad_alignment_or_color_is_an_error() {
        assert!(merged("[typeset]\nalign = \"justify\"\n").is_err());
        assert!(merged("[erase]\nfill_color = \"white\"\n").is_err());
    }

    #[test]
    fn extra_file_overrides_defaults() {
        with_temp_home(|home| {
            let dir = tempdir().expect("tempdir");
            let path = dir.path().join("custom.toml");
            fs::write(
                &path,
                "[typeset]\nfont_size = 40\nalign = \"right\"\ntext_color = \"#c40000\"\nfont_path = \"/fonts/a.ttf\"\n",
            )
            .expect("write settings");

            let settings = load_settings(Some(&path)).expect("load settings");
            assert_eq!(settings.font_size, 40);
            assert_eq!(settings.min_font_size, 8);
            assert_eq!(settings.align, Alignment::Right);
            assert_eq!(settings.text_color, Color { r: 0xc4, g: 0, b: 0 });
            assert_eq!(settings.font_path.as_deref(), Some("/fonts/a.ttf"));
            assert!(home.join(".scanlate-typeset").join("settings.toml").exists());
        });
    }

    #[test]
    fn later_layers_win_over_earlier_ones() {
        with_temp_home(|home| {
            let settings_dir = home.join(".scanlate-typeset");
            fs::create_dir_all(&settings_dir).expect("settings dir");
            fs::write(
                settings_dir.join("settings.toml"),
                "[typeset]\nfont_size = 30\nmin_font_size = 10\n",
            )
            .expect("write home settings");
            fs::write(
                settings_dir.join("settings.local.toml"),
                "[typeset]\nfont_size = 32\n[erase]\nfill_color = \"#eeeeee\"\n",
            )
            .expect("write home local settings");

            let settings = load_settings(None).expect("load settings");
            assert_eq!(settings.font_size, 32);
            assert_eq!(settings.min_font_size, 10);
            assert_eq!(settings.erase_fill_color, Color { r: 0xee, g: 0xee, b: 0xee });

            let dir = tempdir().expect("tempdir");
            let extra = dir.path().join("extra.toml");
            fs::write(&extra, "[typeset]\nfont_size = 36\n").expect("write extra settings");

            let settings = load_settings(Some(&extra)).expect("load settings");
            assert_eq!(settings.font_size, 36);
            assert_eq!(settings.min_font_size, 10);
            assert_eq!(settings.erase_fill_color, Color { r: 0xee, g: 0xee, b: 0xee });

            let seeded = fs::read_to_string(settings_dir.join("settings.toml")).expect("read");
            assert!(seeded.contains("font_size = 30"));
        });
    }

    #[test]
    fn missing_home_settings_are_seeded_then_merged() {
        with_temp_home(|home| {
            let settings_dir = home.join(".scanlate-typeset");
            fs::create_dir_all(&settings_dir).expect("settings dir");
            fs::write(
                settings_dir.join("settings.local.toml"),
                "[typeset]\nmargin = 9\n",
            )
            .expect("write home local settings");

            let settings = load_settings(None).expect("load settings");
            let seeded = fs::read_to_string(settings_dir.join("settings.toml")).expect("seeded");
            assert_eq!(seeded, DEFAULT_SETTINGS_TOML);
            assert_eq!(settings.font_size, 28);
            assert_eq!(settings.margin, 9);
            assert_eq!(
                settings,
                Settings {
                    margin: 9,
                    ..Settings::default()
                }
            );
        });
    }

    #[test]
    fn missing_extra_file_is_an_error() {
        with_temp_home(|_| {
            let dir = tempdir().expect("tempdir");
            let err = load_settings(Some(&dir.path().join("nope.toml"))).unwrap_err();
            assert!(err.to_string().contains("settings file not found"));
        });
    }

    #[test]
    fn layout_options_follow_settings() {
        let settings = Settings {
            font_size: 20,
            margin: 0,
            ..Settings::default()
        };
        let options = settings.layout_options();
        assert_eq!(options.font_size, 20);
        assert_eq!(options.margin, 0);
        assert_eq!(options.align, Alignment::Center);
    }
}
