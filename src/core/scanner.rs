// asascan - core/scanner.rs
//
// Single-pass, line-oriented scan of a log stream.
// Core layer: accepts BufRead, never touches the filesystem directly.

use crate::core::model::{Preview, ScanSummary};
use crate::core::patterns::ExtractionRules;
use crate::util::constants;
use crate::util::error::ScanError;
use std::io::{BufRead, Read};

/// Limits applied while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// How many raw lines from the start of the file to preview.
    pub raw_preview_lines: usize,
    /// How many source-matching lines to preview.
    pub source_preview_lines: usize,
    /// Width, in characters, of a source preview.
    pub preview_max_chars: usize,
    /// Longest line accepted, in bytes, counting its terminator. An
    /// unterminated last line must be strictly shorter.
    pub max_line_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            raw_preview_lines: constants::DEFAULT_RAW_PREVIEW_LINES,
            source_preview_lines: constants::DEFAULT_SOURCE_PREVIEW_LINES,
            preview_max_chars: constants::DEFAULT_PREVIEW_MAX_CHARS,
            max_line_bytes: constants::DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Applies the extraction rules to every line of a stream and accumulates
/// the distinct values found.
#[derive(Debug, Clone, Default)]
pub struct LogScanner {
    rules: ExtractionRules,
    config: ScanConfig,
}

impl LogScanner {
    pub fn new(rules: ExtractionRules, config: ScanConfig) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `reader` to the end.
    ///
    /// `on_preview` is called as soon as a preview-worthy line is seen, so
    /// a caller printing previews shows them in file order before the scan
    /// finishes. For a given line the raw preview comes before the source
    /// preview.
    ///
    /// Lines end at `\n`; a trailing `\r` is dropped. A final line without
    /// a terminator still counts. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    /// A read failure or an overlong line aborts the scan. Nothing
    /// accumulated up to that point is returned.
    pub fn scan<R, F>(&self, mut reader: R, mut on_preview: F) -> Result<ScanSummary, ScanError>
    where
        R: BufRead,
        F: FnMut(Preview),
    {
        let mut summary = ScanSummary::default();
        let mut buf: Vec<u8> = Vec::new();
        // The terminator counts toward the limit. A line that fills the
        // whole window without one is too long, even at end of input.
        let read_limit = self.config.max_line_bytes.max(1) as u64;

        loop {
            let line_number = summary.stats.lines_read + 1;

            buf.clear();
            let n = reader
                .by_ref()
                .take(read_limit)
                .read_until(b'\n', &mut buf)
                .map_err(|e| ScanError::Read {
                    line_number,
                    source: e,
                })?;
            if n == 0 {
                break;
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
            } else if n as u64 >= read_limit {
                return Err(ScanError::LineTooLong {
                    line_number,
                    length: n,
                    max_length: self.config.max_line_bytes,
                });
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }

            let line = String::from_utf8_lossy(&buf);
            self.scan_line(&line, line_number, &mut summary, &mut on_preview);
            summary.stats.lines_read = line_number;
        }

        tracing::debug!(
            lines = summary.stats.lines_read,
            source_matches = summary.stats.source_matches,
            alert_matches = summary.stats.alert_matches,
            ip_occurrences = summary.stats.ip_occurrences,
            sources = summary.sources.len(),
            message_types = summary.message_types.len(),
            ip_addresses = summary.ip_addresses.len(),
            "Scan complete"
        );

        Ok(summary)
    }

    /// Scan `reader` and return the previews alongside the summary.
    pub fn scan_collect<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(ScanSummary, Vec<Preview>), ScanError> {
        let mut previews = Vec::new();
        let summary = self.scan(reader, |p| previews.push(p))?;
        Ok((summary, previews))
    }

    fn scan_line<F: FnMut(Preview)>(
        &self,
        line: &str,
        line_number: u64,
        summary: &mut ScanSummary,
        on_preview: &mut F,
    ) {
        if line_number <= self.config.raw_preview_lines as u64 {
            on_preview(Preview::Raw {
                line_number,
                text: line.to_string(),
            });
        }

        if let Some(source) = self.rules.source_token(line) {
            summary.stats.source_matches += 1;
            if summary.stats.source_matches <= self.config.source_preview_lines as u64 {
                on_preview(Preview::Source {
                    line_number,
                    source: source.to_string(),
                    text: truncate_chars(line, self.config.preview_max_chars).to_string(),
                });
            }
            if !summary.sources.contains(source) {
                tracing::trace!(line = line_number, source, "New source");
                summary.sources.insert(source.to_string());
            }
        }

        if let Some(code) = self.rules.message_type(line) {
            summary.stats.alert_matches += 1;
            if !summary.message_types.contains(code) {
                summary.message_types.insert(code.to_string());
            }
        }

        for ip in self.rules.ip_candidates(line) {
            summary.stats.ip_occurrences += 1;
            if !summary.ip_addresses.contains(ip) {
                summary.ip_addresses.insert(ip.to_string());
            }
        }

        if line_number == 1 {
            tracing::debug!(
                line = %truncate_chars(line, constants::DEBUG_MAX_LINE_PREVIEW),
                "First line"
            );
        }
    }
}

/// Prefix of `s` holding at most `max_chars` characters. Never splits a
/// UTF-8 sequence.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
