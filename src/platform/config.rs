// asascan - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for asascan configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/asascan/ or %APPDATA%\asascan\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[scan]` section.
    pub scan: ScanSection,
    /// `[patterns]` section.
    pub patterns: PatternsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[scan]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub raw_preview_lines: Option<usize>,
    pub source_preview_lines: Option<usize>,
    pub preview_max_chars: Option<usize>,
    pub max_line_bytes: Option<usize>,
}

/// `[patterns]` config section. Each key replaces one built-in rule.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PatternsSection {
    pub source: Option<String>,
    pub alert: Option<String>,
    pub ip: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Numeric values are checked against named constants here. Pattern
/// overrides are only carried; they are compiled when the scanner is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub raw_preview_lines: usize,
    pub source_preview_lines: usize,
    pub preview_max_chars: usize,
    pub max_line_bytes: usize,

    pub source_pattern: Option<String>,
    pub alert_pattern: Option<String>,
    pub ip_pattern: Option<String>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            raw_preview_lines: constants::DEFAULT_RAW_PREVIEW_LINES,
            source_preview_lines: constants::DEFAULT_SOURCE_PREVIEW_LINES,
            preview_max_chars: constants::DEFAULT_PREVIEW_MAX_CHARS,
            max_line_bytes: constants::DEFAULT_MAX_LINE_BYTES,
            source_pattern: None,
            alert_pattern: None,
            ip_pattern: None,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. A missing file yields defaults; it is only reported when
/// `explicit` is set (the user named the file with --config). An
/// unparseable file yields defaults plus the parse error. Out-of-range
/// values fall back to their defaults individually.
pub fn load_config(config_path: &Path, explicit: bool) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !explicit && !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Apply a raw config on top of the defaults, pushing a warning for every
/// value that is rejected.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    let mut bounded = |field: &str, value: Option<usize>, min: usize, max: usize, target: &mut usize| {
        if let Some(v) = value {
            if (min..=max).contains(&v) {
                *target = v;
            } else {
                warnings.push(ConfigError::ValueOutOfRange {
                    field: field.to_string(),
                    value: v.to_string(),
                    expected: format!("{min}-{max} (default {})", *target),
                });
            }
        }
    };

    bounded(
        "scan.raw_preview_lines",
        raw.scan.raw_preview_lines,
        0,
        constants::MAX_PREVIEW_LINES,
        &mut config.raw_preview_lines,
    );
    bounded(
        "scan.source_preview_lines",
        raw.scan.source_preview_lines,
        0,
        constants::MAX_PREVIEW_LINES,
        &mut config.source_preview_lines,
    );
    bounded(
        "scan.preview_max_chars",
        raw.scan.preview_max_chars,
        constants::MIN_PREVIEW_MAX_CHARS,
        constants::MAX_PREVIEW_MAX_CHARS,
        &mut config.preview_max_chars,
    );
    bounded(
        "scan.max_line_bytes",
        raw.scan.max_line_bytes,
        constants::MIN_MAX_LINE_BYTES,
        constants::ABSOLUTE_MAX_LINE_BYTES,
        &mut config.max_line_bytes,
    );

    config.source_pattern = raw.patterns.source;
    config.alert_pattern = raw.patterns.alert;
    config.ip_pattern = raw.patterns.ip;

    if let Some(level) = raw.logging.level {
        let lowered = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lowered.as_str()) {
            config.log_level = Some(lowered);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_default_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"), false);
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("nope.toml"), true);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(warnings.as_slice(), [ConfigError::Io { .. }]));
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
[scan]
raw_preview_lines = 0
source_preview_lines = 10
preview_max_chars = 80
max_line_bytes = 1048576

[patterns]
alert = '%FTD-[0-9]+-([0-9]+):'

[logging]
level = "DEBUG"

[unknown_section]
ignored = true
"#,
        );
        let (config, warnings) = load_config(file.path(), true);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.raw_preview_lines, 0);
        assert_eq!(config.source_preview_lines, 10);
        assert_eq!(config.preview_max_chars, 80);
        assert_eq!(config.max_line_bytes, 1_048_576);
        assert_eq!(config.alert_pattern.as_deref(), Some("%FTD-[0-9]+-([0-9]+):"));
        assert_eq!(config.source_pattern, None);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let file = write_config(
            r#"
[scan]
preview_max_chars = 0
max_line_bytes = 10
source_preview_lines = 7

[logging]
level = "loud"
"#,
        );
        let (config, warnings) = load_config(file.path(), true);
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.preview_max_chars, constants::DEFAULT_PREVIEW_MAX_CHARS);
        assert_eq!(config.max_line_bytes, constants::DEFAULT_MAX_LINE_BYTES);
        assert_eq!(config.source_preview_lines, 7);
        assert_eq!(config.log_level, None);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, ConfigError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_unparseable_file() {
        let file = write_config("[scan\nraw_preview_lines = ");
        let (config, warnings) = load_config(file.path(), false);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(warnings.as_slice(), [ConfigError::TomlParse { .. }]));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let file = write_config("[scan]\nraw_preview_lines = \"three\"\n");
        let (_, warnings) = load_config(file.path(), false);
        assert!(matches!(warnings.as_slice(), [ConfigError::TomlParse { .. }]));
    }

    #[test]
    fn test_config_file_name() {
        let paths = PlatformPaths {
            config_dir: PathBuf::from("/etc/asascan"),
        };
        assert_eq!(paths.config_file(), PathBuf::from("/etc/asascan/config.toml"));
    }
}
