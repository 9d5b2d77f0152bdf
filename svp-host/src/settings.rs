//! Settings file parsing
//!
//! Parses `svp.toml`. Every section and key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svp_common::{EncodeOptions, OverflowPolicy};

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "svp.toml";

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvpSettings {
    pub import: ImportSettings,
    pub export: ExportSettings,
    pub palette: PaletteSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Merge coincident vertices after import
    pub weld_vertices: bool,
    /// Grid size used when welding, one 8.8 step by default
    pub weld_epsilon: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            weld_vertices: false,
            weld_epsilon: default_weld_epsilon(),
        }
    }
}

fn default_weld_epsilon() -> f32 {
    1.0 / 256.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub overflow: OverflowPolicy,
}

impl ExportSettings {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            overflow: self.overflow,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Palette file loaded by `import_with_settings`, relative to the model
    pub path: Option<PathBuf>,
}

impl SvpSettings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse SVP settings")
    }

    pub fn encode_options(&self) -> EncodeOptions {
        self.export.encode_options()
    }
}

/// Load settings from a TOML file
pub fn load_settings(path: &Path) -> Result<SvpSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {:?}", path))?;
    let settings: SvpSettings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {:?}", path))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = SvpSettings::from_toml("").unwrap();
        assert_eq!(settings, SvpSettings::default());
        assert!(!settings.import.weld_vertices);
        assert_eq!(settings.import.weld_epsilon, 1.0 / 256.0);
        assert_eq!(settings.export.overflow, OverflowPolicy::Wrap);
        assert_eq!(settings.palette.path, None);
    }

    #[test]
    fn test_full_settings() {
        let settings = SvpSettings::from_toml(
            r#"
            [import]
            weld_vertices = true
            weld_epsilon = 0.5

            [export]
            overflow = "error"

            [palette]
            path = "ship.pal"
            "#,
        )
        .unwrap();

        assert!(settings.import.weld_vertices);
        assert_eq!(settings.import.weld_epsilon, 0.5);
        assert_eq!(settings.encode_options(), EncodeOptions::strict());
        assert_eq!(settings.palette.path, Some(PathBuf::from("ship.pal")));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings = SvpSettings::from_toml("[import]\nweld_vertices = true\n").unwrap();
        assert!(settings.import.weld_vertices);
        assert_eq!(settings.import.weld_epsilon, 1.0 / 256.0);
    }

    #[test]
    fn test_unknown_overflow_policy_rejected() {
        assert!(SvpSettings::from_toml("[export]\noverflow = \"clamp\"\n").is_err());
    }
}
