// asascan - app/run.rs
//
// One complete run: open the log, stream the banner and previews, scan,
// then write the results. Nothing past the previews is written when the
// scan fails.

use crate::core::model::ScanSummary;
use crate::core::patterns::ExtractionRules;
use crate::core::report;
use crate::core::scanner::{LogScanner, ScanConfig};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::error::{AsaScanError, ConfigError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Build the scanner described by a validated config.
///
/// Rejected pattern overrides come back as `ConfigError::Pattern` and the
/// built-in rule is used in their place.
pub fn build_scanner(config: &AppConfig) -> (LogScanner, Vec<ConfigError>) {
    let (rules, pattern_errors) = ExtractionRules::with_overrides(
        config.source_pattern.as_deref(),
        config.alert_pattern.as_deref(),
        config.ip_pattern.as_deref(),
    );

    let scan_config = ScanConfig {
        raw_preview_lines: config.raw_preview_lines,
        source_preview_lines: config.source_preview_lines,
        preview_max_chars: config.preview_max_chars,
        max_line_bytes: config.max_line_bytes,
    };

    let warnings = pattern_errors.into_iter().map(ConfigError::Pattern).collect();
    (LogScanner::new(rules, scan_config), warnings)
}

/// Scan the file at `path` and write the full console output to `out`.
///
/// The file handle lives only for the duration of this call.
pub fn run<W: Write>(path: &Path, scanner: &LogScanner, mut out: W) -> Result<ScanSummary> {
    let reader = fs::open_log(path)?;
    tracing::info!(path = %path.display(), "Scanning");

    report::write_banner(&mut out).map_err(output_error)?;

    let mut write_failure: Option<io::Error> = None;
    let summary = scanner.scan(reader, |preview| {
        if write_failure.is_none() {
            if let Err(e) = report::write_preview(&mut out, &preview) {
                write_failure = Some(e);
            }
        }
    })?;
    if let Some(e) = write_failure {
        return Err(output_error(e));
    }

    report::write_report(&mut out, &summary).map_err(output_error)?;
    out.flush().map_err(output_error)?;

    tracing::info!(
        lines = summary.line_count(),
        sources = summary.sources.len(),
        message_types = summary.message_types.len(),
        ip_addresses = summary.ip_addresses.len(),
        "Report written"
    );

    Ok(summary)
}

fn output_error(source: io::Error) -> AsaScanError {
    AsaScanError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write report",
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::ScanError;

    fn log_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Accepts `budget` bytes, then fails.
    struct ShortWriter {
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_writes_everything() {
        let file = log_file("Jan 1 00:00:01 hostA %ASA-4-106023: from 10.0.0.1 to 10.0.0.2\n");
        let mut out = Vec::new();
        let summary = run(file.path(), &LogScanner::default(), &mut out).unwrap();
        assert_eq!(summary.line_count(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== LOG FORMAT ANALYSIS ===\nLine 1: Jan 1"));
        assert!(text.contains("Source 'hostA' found in line 1: "));
        assert!(text.contains("Message sources (1):\n  hostA\n"));
        assert!(text.contains("Message types (1):\n  106023\n"));
        assert!(text.contains("IP addresses (2):\n  10.0.0.1\n  10.0.0.2\n"));
    }

    #[test]
    fn test_run_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = run(&dir.path().join("missing.log"), &LogScanner::default(), &mut out)
            .unwrap_err();
        assert!(matches!(err, AsaScanError::Scan(ScanError::Open { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_scan_failure_skips_results() {
        let (scanner, _) = build_scanner(&AppConfig {
            max_line_bytes: 8,
            ..AppConfig::default()
        });
        let file = log_file("ok\nthis one is too long\n");
        let mut out = Vec::new();
        let err = run(file.path(), &scanner, &mut out).unwrap_err();
        assert!(matches!(
            err,
            AsaScanError::Scan(ScanError::LineTooLong { line_number: 2, .. })
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Line 1: ok"));
        assert!(!text.contains("RESULTS"));
    }

    #[test]
    fn test_run_output_failure() {
        let file = log_file("a\nb\n");
        let err = run(
            file.path(),
            &LogScanner::default(),
            ShortWriter { budget: 30 },
        )
        .unwrap_err();
        assert!(matches!(err, AsaScanError::Io { operation: "write report", .. }));
    }

    #[test]
    fn test_build_scanner_maps_config() {
        let config = AppConfig {
            raw_preview_lines: 1,
            source_preview_lines: 2,
            preview_max_chars: 40,
            max_line_bytes: 2048,
            ip_pattern: Some("(".to_string()),
            ..AppConfig::default()
        };
        let (scanner, warnings) = build_scanner(&config);
        assert_eq!(scanner.config().raw_preview_lines, 1);
        assert_eq!(scanner.config().source_preview_lines, 2);
        assert_eq!(scanner.config().preview_max_chars, 40);
        assert_eq!(scanner.config().max_line_bytes, 2048);
        assert!(matches!(warnings.as_slice(), [ConfigError::Pattern(_)]));
        assert_eq!(
            scanner.rules().ip_pattern(),
            crate::core::patterns::DEFAULT_IP_PATTERN
        );
    }
}
