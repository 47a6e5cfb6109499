//!
//! Veto filters: strong counter-signals that override a positive keyword score.
//!
//! Two independent detectors run over the same fragment. The brace-shape detector catches
//! C-family and other brace-delimited languages, the SQL-shape detector catches T-SQL
//! scripts and plain queries, which share many keywords with Clarion.

use regex::RegexSet;
use std::fmt;
use std::sync::LazyLock;

/// Markers that veto on their own: `@identifier`, `SET NOCOUNT ON`, `CREATE|ALTER PROC`,
/// bracket-qualified names, a lone `GO` line, and comment markers.
static SQL_STRONG_MARKERS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?:^|[^\w@])@[A-Za-z_]\w*",
        r"(?i)\bSET\s+NOCOUNT\s+ON\b",
        r"(?i)\b(?:CREATE|ALTER)\s+PROC(?:EDURE)?\b",
        r"\[[A-Za-z_][\w ]*\]\s*\.\s*\[[A-Za-z_][\w ]*\]",
        r"(?im)^[ \t]*GO[ \t\r]*$",
        r"(?m)(?:^|\s)--|/\*",
    ])
    .unwrap()
});

/// Statement-shape markers; two distinct ones are needed to veto.
static SQL_WEAK_MARKERS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?is)\bSELECT\b.*?\bFROM\b",
        r"(?i)\bINSERT\s+INTO\b",
        r"(?is)\bUPDATE\b.*?\bSET\b",
        r"(?i)\bDELETE\s+FROM\b",
        r"(?i)\bJOIN\b",
        r"(?i)\bWHERE\b",
        r"(?i)\bGROUP\s+BY\b",
        r"(?i)\bORDER\s+BY\b",
    ])
    .unwrap()
});

/// Number of distinct weak SQL markers that together fire the SQL veto.
pub const SQL_WEAK_MARKER_THRESHOLD: usize = 2;

/// Which detector vetoed a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VetoSignal {
    BraceShape,
    SqlShape,
}

impl fmt::Display for VetoSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VetoSignal::BraceShape => write!(f, "brace-delimited block"),
            VetoSignal::SqlShape => write!(f, "SQL statement"),
        }
    }
}

/// True if a `{ … }` pair spans a line break, or a line ends with an open brace.
pub fn has_brace_shape(text: &str) -> bool {
    if !text.contains('{') {
        return false;
    }

    // Line index of every brace still open
    let mut open: Vec<usize> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        if line.trim().ends_with('{') {
            return true;
        }
        for c in line.chars() {
            match c {
                '{' => open.push(line_idx),
                '}' => {
                    if let Some(opened_on) = open.pop()
                        && opened_on != line_idx
                    {
                        return true;
                    }
                }
                _ => {}
            }
        }
    }

    false
}

/// Number of distinct statement-shape markers present.
pub fn sql_weak_marker_count(text: &str) -> usize {
    SQL_WEAK_MARKERS.matches(text).iter().count()
}

/// True if the fragment carries a strong SQL marker or enough statement-shape markers.
pub fn has_sql_shape(text: &str) -> bool {
    SQL_STRONG_MARKERS.is_match(text) || sql_weak_marker_count(text) >= SQL_WEAK_MARKER_THRESHOLD
}

/// Run both detectors, brace shape first.
pub fn detect_veto(text: &str) -> Option<VetoSignal> {
    if has_brace_shape(text) {
        Some(VetoSignal::BraceShape)
    } else if has_sql_shape(text) {
        Some(VetoSignal::SqlShape)
    } else {
        None
    }
}
