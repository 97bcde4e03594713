// asascan - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "asascan";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "asascan";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Preview limits
// =============================================================================

/// Number of raw lines echoed from the start of the file.
pub const DEFAULT_RAW_PREVIEW_LINES: usize = 3;

/// Number of source-matching lines echoed with their extracted token.
pub const DEFAULT_SOURCE_PREVIEW_LINES: usize = 5;

/// Maximum characters of a line shown in a source preview.
pub const DEFAULT_PREVIEW_MAX_CHARS: usize = 100;

/// Upper bound for either preview count in config.toml.
pub const MAX_PREVIEW_LINES: usize = 100;

/// Lower bound for `preview_max_chars` (zero would print empty previews).
pub const MIN_PREVIEW_MAX_CHARS: usize = 1;

/// Upper bound for `preview_max_chars`.
pub const MAX_PREVIEW_MAX_CHARS: usize = 10_000;

// =============================================================================
// Line limits
// =============================================================================

/// Longest line accepted by the scanner, in bytes, counting its `\n`.
/// Anything longer aborts the scan with `ScanError::LineTooLong`.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024; // 64 KB

/// Smallest configurable line limit.
pub const MIN_MAX_LINE_BYTES: usize = 1024; // 1 KB

/// Largest configurable line limit.
pub const ABSOLUTE_MAX_LINE_BYTES: usize = 16 * 1024 * 1024; // 16 MB

// =============================================================================
// Pattern limits
// =============================================================================

/// Maximum regex pattern length to prevent ReDoS via config overrides.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Stdout carries the report, so stderr stays quiet
/// unless something is wrong.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

/// Levels accepted by `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
