//! Structured JSON logger
//!
//! One log line = one event. The event name and severity lead the line,
//! followed by caller-supplied fields in caller order. Writes are synchronous
//! and unbuffered so log order matches execution order.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Race-step detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger
pub struct Logger;

impl Logger {
    /// Logs an event to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        let _ = writeln!(io::stdout(), "{line}");
    }

    /// Logs an event to stderr (errors and failures).
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        let _ = writeln!(io::stderr(), "{line}");
    }

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push('{');
        line.push_str("\"event\":");
        line.push_str(&escape(event));
        line.push_str(",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');
        for (key, value) in fields {
            line.push(',');
            line.push_str(&escape(key));
            line.push(':');
            line.push_str(&escape(value));
        }
        line.push('}');
        line
    }
}

fn escape(s: &str) -> String {
    // serde_json string encoding handles quoting and control characters.
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_render_is_valid_json() {
        let line = Logger::render(
            Severity::Trace,
            "plan_race_won",
            &[("cursor", "IndexCursor a_1_b_1"), ("n", "2")],
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "plan_race_won");
        assert_eq!(parsed["severity"], "TRACE");
        assert_eq!(parsed["cursor"], "IndexCursor a_1_b_1");
        assert_eq!(parsed["n"], "2");
    }

    #[test]
    fn test_render_escapes_values() {
        let line = Logger::render(Severity::Error, "failed", &[("reason", "a \"quoted\" cause")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["reason"], "a \"quoted\" cause");
    }
}
