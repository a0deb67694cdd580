//! Settings file handling.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/com.ikprint.ikprint/
//! - Windows: %APPDATA%/ikprint/ikprint/config/
//! - Linux: ~/.config/ikprint/
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use ikprint_ingest::{DocumentSource, ExtractionOptions};
use ikprint_model::Layout;
use ikprint_output::OutputOptions;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ikprint";
const APP_NAME: &str = "ikprint";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub documents: DocumentSource,
    pub extraction: ExtractionOptions,
    pub layout: Layout,
    pub output: OutputOptions,
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings.
///
/// An explicit path must exist and parse. The default settings file falls
/// back to defaults when it is missing or unreadable.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let settings = parse_settings(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        info!(path = %path.display(), "loaded settings");
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        warn!("could not determine settings path, using defaults");
        return Ok(Settings::default());
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to parse settings file, using defaults");
                Ok(Settings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file found, using defaults");
            Ok(Settings::default())
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

/// Serialize settings as they would appear in `settings.toml`.
pub fn settings_to_toml(settings: &Settings) -> Result<String> {
    toml::to_string_pretty(settings).context("serialize settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikprint_output::SinkKind;

    #[test]
    fn test_settings_path_exists() {
        let path = settings_path();
        assert!(path.is_some_and(|p| p.ends_with(CONFIG_FILENAME)));
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = parse_settings(
            r#"
[documents]
directory = "/srv/admissions"

[extraction]
first_row = 10

[layout]
row_length = 6

[output]
sink = "print"
printer = ["lp", "-d", "ward-3"]
"#,
        )
        .unwrap();

        assert_eq!(settings.documents.directory, PathBuf::from("/srv/admissions"));
        assert_eq!(settings.documents.extension, "docx");
        assert_eq!(settings.extraction.first_row, 10);
        assert_eq!(settings.extraction.end_row, 17);
        assert_eq!(settings.layout.row_length.get(), 6);
        assert_eq!(settings.layout.column_height.get(), 4);
        assert_eq!(settings.output.sink, SinkKind::Print);
        assert_eq!(settings.output.printer, vec!["lp", "-d", "ward-3"]);
        assert_eq!(settings.output.preview, SinkKind::Terminal);
    }

    #[test]
    fn test_default_settings_round_trip() {
        let settings = Settings::default();
        let toml = settings_to_toml(&settings).unwrap();
        assert_eq!(parse_settings(&toml).unwrap(), settings);
    }

    #[test]
    fn test_unknown_sink_is_rejected() {
        assert!(parse_settings("[output]\nsink = \"fax\"\n").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_settings(Some(&missing)).is_err());
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[layout]\nvertical_offset = 30\n").unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.layout.vertical_offset, 30);
    }
}
