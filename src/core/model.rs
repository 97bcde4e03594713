// asascan - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.

use std::collections::BTreeSet;

// =============================================================================
// Scan results
// =============================================================================

/// Counters collected during a single pass over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Total newline-delimited lines read.
    pub lines_read: u64,

    /// Lines on which the source pattern matched.
    pub source_matches: u64,

    /// Lines carrying an alert tag.
    pub alert_matches: u64,

    /// IP candidates seen, counting repeats.
    pub ip_occurrences: u64,
}

/// Everything a scan produces.
///
/// The sets are `BTreeSet`s, so each value appears once and iteration is
/// in ascending byte order regardless of the order values were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Distinct source tokens (hostnames following the syslog timestamp).
    pub sources: BTreeSet<String>,

    /// Distinct ASA message codes, e.g. `106023`.
    pub message_types: BTreeSet<String>,

    /// Distinct IPv4-shaped substrings. Not range-checked.
    pub ip_addresses: BTreeSet<String>,

    pub stats: RunStatistics,
}

impl ScanSummary {
    /// Number of lines read; shorthand for `stats.lines_read`.
    pub fn line_count(&self) -> u64 {
        self.stats.lines_read
    }
}

// =============================================================================
// Previews
// =============================================================================

/// A diagnostic echo of an early line, emitted while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// One of the first raw lines of the file, untruncated.
    Raw { line_number: u64, text: String },

    /// One of the first lines where a source token was found. `text` is
    /// already truncated to the preview width.
    Source {
        line_number: u64,
        source: String,
        text: String,
    },
}

impl Preview {
    pub fn line_number(&self) -> u64 {
        match self {
            Preview::Raw { line_number, .. } | Preview::Source { line_number, .. } => *line_number,
        }
    }
}
