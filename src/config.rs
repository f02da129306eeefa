//! Overlay style and settings file.

use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("face-overlay")
}

/// Default location of the settings file.
pub fn settings_path() -> PathBuf {
    app_dir().join("settings.json")
}

/// How detections are drawn. The defaults are the house style: 4 px blue
/// stroke, 24 pt labels, 20 px below the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub color: [u8; 3],
    pub stroke_width: u32,
    /// Label size in points.
    pub font_size: f32,
    /// Distance from the bottom edge of the box to the label baseline.
    pub label_offset: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 255],
            stroke_width: 4,
            font_size: 24.0,
            label_offset: 20,
        }
    }
}

impl OverlayStyle {
    pub fn rgba(&self) -> image::Rgba<u8> {
        let [r, g, b] = self.color;
        image::Rgba([r, g, b, 255])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub style: OverlayStyle,
    /// Where temp artifacts go; the OS temp dir when unset.
    pub temp_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: OverlayStyle::default(),
            temp_dir: None,
            log_level: "info".into(),
        }
    }
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(OverlayError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| OverlayError::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let io_err = |source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|source| OverlayError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_house_style() {
        let s = OverlayStyle::default();
        assert_eq!(s.rgba(), image::Rgba([0, 0, 255, 255]));
        assert_eq!(s.stroke_width, 4);
        assert_eq!(s.font_size, 24.0);
        assert_eq!(s.label_offset, 20);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            style: OverlayStyle {
                color: [255, 0, 0],
                ..OverlayStyle::default()
            },
            temp_dir: Some(dir.path().join("scratch")),
            log_level: "debug".into(),
        };

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"style": {"stroke_width": 2}}"#).unwrap();

        let s = load_settings(&path).unwrap();
        assert_eq!(s.style.stroke_width, 2);
        assert_eq!(s.style.color, [0, 0, 255]);
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(OverlayError::Config { .. })
        ));
    }

    #[test]
    fn settings_live_under_app_dir() {
        assert!(settings_path().ends_with("face-overlay/settings.json"));
    }
}
