// asascan - core/report.rs
//
// Console rendering of previews and the final report.
// Core layer: writes to any Write trait object.

use crate::core::model::{Preview, ScanSummary};
use std::collections::BTreeSet;
use std::io::{self, Write};

pub const ANALYSIS_BANNER: &str = "=== LOG FORMAT ANALYSIS ===";
pub const RESULTS_BANNER: &str = "==== RESULTS ====";

/// Write the banner that precedes the previews.
pub fn write_banner<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "{ANALYSIS_BANNER}")
}

/// Write a single preview line.
pub fn write_preview<W: Write>(mut out: W, preview: &Preview) -> io::Result<()> {
    match preview {
        Preview::Raw { line_number, text } => writeln!(out, "Line {line_number}: {text}"),
        Preview::Source {
            line_number,
            source,
            text,
        } => writeln!(out, "Source '{source}' found in line {line_number}: {text}"),
    }
}

/// Write the results section: line count, then each set sorted ascending
/// under a header giving its size.
pub fn write_report<W: Write>(mut out: W, summary: &ScanSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RESULTS_BANNER}")?;
    writeln!(out, "Lines processed: {}", summary.line_count())?;

    writeln!(out, "Distinct message sources: {}", summary.sources.len())?;
    write_set(&mut out, "Message sources", &summary.sources)?;

    writeln!(out)?;
    writeln!(
        out,
        "Distinct Cisco ASA message types: {}",
        summary.message_types.len()
    )?;
    write_set(&mut out, "Message types", &summary.message_types)?;

    writeln!(out)?;
    writeln!(out, "Distinct IP addresses: {}", summary.ip_addresses.len())?;
    write_set(&mut out, "IP addresses", &summary.ip_addresses)?;

    Ok(())
}

/// Render the complete output (banner, previews, results) into a string.
pub fn render_report(summary: &ScanSummary, previews: &[Preview]) -> io::Result<String> {
    let mut buf = Vec::new();
    write_banner(&mut buf)?;
    for preview in previews {
        write_preview(&mut buf, preview)?;
    }
    write_report(&mut buf, summary)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_set<W: Write>(out: &mut W, title: &str, values: &BTreeSet<String>) -> io::Result<()> {
    if values.is_empty() {
        return writeln!(out, "{title}: not found");
    }

    writeln!(out, "{title} ({}):", values.len())?;
    for value in values {
        writeln!(out, "  {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ScanSummary {
        let mut s = ScanSummary::default();
        s.stats.lines_read = 4;
        for src in ["fw2", "fw1", "FW3"] {
            s.sources.insert(src.to_string());
        }
        s.message_types.insert("302013".to_string());
        s.message_types.insert("106023".to_string());
        for ip in ["10.0.0.2", "10.0.0.10", "9.9.9.9"] {
            s.ip_addresses.insert(ip.to_string());
        }
        s
    }

    fn report_of(s: &ScanSummary) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, s).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_full_report_shape() {
        let expected = "\n\
==== RESULTS ====\n\
Lines processed: 4\n\
Distinct message sources: 3\n\
Message sources (3):\n\
\x20 FW3\n\
\x20 fw1\n\
\x20 fw2\n\
\n\
Distinct Cisco ASA message types: 2\n\
Message types (2):\n\
\x20 106023\n\
\x20 302013\n\
\n\
Distinct IP addresses: 3\n\
IP addresses (3):\n\
\x20 10.0.0.10\n\
\x20 10.0.0.2\n\
\x20 9.9.9.9\n";
        assert_eq!(report_of(&summary()), expected);
    }

    #[test]
    fn test_empty_sets_say_not_found() {
        let out = report_of(&ScanSummary::default());
        assert!(out.contains("Lines processed: 0\n"));
        assert!(out.contains("Message sources: not found\n"));
        assert!(out.contains("Message types: not found\n"));
        assert!(out.contains("IP addresses: not found\n"));
        assert_eq!(out.matches("not found").count(), 3);
    }

    #[test]
    fn test_preview_lines() {
        let mut buf = Vec::new();
        write_preview(
            &mut buf,
            &Preview::Raw {
                line_number: 2,
                text: "hello".to_string(),
            },
        )
        .unwrap();
        write_preview(
            &mut buf,
            &Preview::Source {
                line_number: 9,
                source: "asa1".to_string(),
                text: "Jan 1 00:00:00 asa1 x".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Line 2: hello\nSource 'asa1' found in line 9: Jan 1 00:00:00 asa1 x\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let previews = vec![Preview::Raw {
            line_number: 1,
            text: "x".to_string(),
        }];
        let a = render_report(&summary(), &previews).unwrap();
        let b = render_report(&summary(), &previews).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(ANALYSIS_BANNER));
        assert!(a.contains("Line 1: x\n\n==== RESULTS ===="));
    }
}
