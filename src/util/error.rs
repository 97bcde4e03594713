// asascan - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error returned by a run. Pattern and config problems never reach this
/// type: they are reported as `ConfigError` warnings and the defaults used.
#[derive(Debug)]
pub enum AsaScanError {
    /// Opening or reading the log file failed.
    Scan(ScanError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for AsaScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for AsaScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scan(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors raised while opening or reading the input log.
#[derive(Debug)]
pub enum ScanError {
    /// The log file could not be opened (missing path, permissions).
    Open { path: PathBuf, source: io::Error },

    /// The stream failed part-way through.
    Read { line_number: u64, source: io::Error },

    /// A single line exceeded the configured byte limit.
    LineTooLong {
        line_number: u64,
        length: usize,
        max_length: usize,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open '{}': {source}", path.display())
            }
            Self::Read {
                line_number,
                source,
            } => write!(f, "Read failed at line {line_number}: {source}"),
            Self::LineTooLong {
                line_number,
                length,
                max_length,
            } => write!(
                f,
                "Line {line_number} is at least {length} bytes, exceeds maximum of {max_length}. \
                 Raise [scan] max_line_bytes in config.toml."
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::LineTooLong { .. } => None,
        }
    }
}

impl From<ScanError> for AsaScanError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

/// Errors related to building extraction patterns. Surfaced through
/// `ConfigError::Pattern`.
#[derive(Debug)]
pub enum PatternError {
    /// The pattern does not compile.
    InvalidRegex {
        rule: &'static str,
        pattern: String,
        source: regex::Error,
    },

    /// The pattern exceeds the maximum allowed length.
    RegexTooLong {
        rule: &'static str,
        length: usize,
        max_length: usize,
    },

    /// The rule extracts capture group 1 but the pattern has none.
    MissingCaptureGroup { rule: &'static str, pattern: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex {
                rule,
                pattern,
                source,
            } => write!(f, "Invalid regex for '{rule}' ('{pattern}'): {source}"),
            Self::RegexTooLong {
                rule,
                length,
                max_length,
            } => write!(
                f,
                "Regex for '{rule}' is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::MissingCaptureGroup { rule, pattern } => write!(
                f,
                "Regex for '{rule}' ('{pattern}') needs a capture group for the extracted value"
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading. Always non-fatal.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// A pattern override was rejected; the built-in pattern is used.
    Pattern(PatternError),

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Pattern(e) => write!(f, "[patterns] {e}. Using built-in pattern."),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Pattern(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for asascan results.
pub type Result<T> = std::result::Result<T, AsaScanError>;
