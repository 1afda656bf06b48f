//! Terminal styling for report lines.
//!
//! Lines are composed with ANSI colours and status glyphs. When the output is
//! not a colour terminal both are rewritten to plain text.
use regex::Regex;
use std::sync::OnceLock;

pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";
pub const SUCCESS_GLYPH: &str = "✓";
pub const FAILURE_GLYPH: &str = "✗";

/// Whether colour and glyphs are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Color,
    Plain,
}

impl Style {
    /// Colour when `TERM` is set to something non-empty.
    pub fn from_env() -> Self {
        Self::from_term(std::env::var("TERM").ok().as_deref())
    }

    pub fn from_term(term: Option<&str>) -> Self {
        match term {
            Some(term) if !term.is_empty() => Style::Color,
            _ => Style::Plain,
        }
    }

    /// Apply the style to a composed line.
    pub fn apply(self, line: &str) -> String {
        match self {
            Style::Color => line.to_string(),
            Style::Plain => plain(line),
        }
    }
}

fn ansi_escape() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("regex for ANSI escapes"))
}

fn plain(line: &str) -> String {
    ansi_escape()
        .replace_all(line, "")
        .replace(SUCCESS_GLYPH, "success")
        .replace(FAILURE_GLYPH, "FAILURE")
}
