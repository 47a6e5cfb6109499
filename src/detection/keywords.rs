//!
//! Keyword groups and the weighted signal extractor.
//!
//! Tokens are stored upper-case in compile-time perfect-hash sets. Matching is whole-word
//! and case-insensitive: the input is split into runs of alphanumeric characters and
//! underscores, and each run is looked up in every group.

use phf::{Set, phf_set};

/// Structural keywords that almost only occur in Clarion source.
static HARD_KEYWORDS: Set<&'static str> = phf_set! {
    "PROGRAM", "MEMBER", "MAP", "MODULE", "PROCEDURE", "FUNCTION", "ROUTINE", "CODE",
    "END", "CASE", "OF", "OROF", "LOOP", "UNTIL", "WHILE", "THEN", "ELSIF", "RETURN",
    "EXIT", "CYCLE", "BREAK", "ACCEPT", "EXECUTE", "QUEUE", "RECORD", "CLASS",
    "INTERFACE", "WINDOW",
};

/// Keywords shared with many other languages or with ordinary prose.
static SOFT_KEYWORDS: Set<&'static str> = phf_set! {
    "IF", "ELSE", "DO", "TO", "BY", "BEGIN", "SELF", "PARENT", "INCLUDE", "EQUATE",
    "LIKE", "DERIVED", "VIRTUAL", "PRIVATE", "PROTECTED", "ITEMIZE", "COMPILE", "OMIT",
    "IMPLEMENTS", "DIM", "OVER", "PRE", "AUTO", "STATIC", "THREAD",
};

static TYPE_NAMES: Set<&'static str> = phf_set! {
    "BYTE", "SHORT", "USHORT", "LONG", "ULONG", "SIGNED", "UNSIGNED", "REAL", "SREAL",
    "DECIMAL", "PDECIMAL", "STRING", "CSTRING", "PSTRING", "ASTRING", "BSTRING",
    "USTRING", "DATE", "TIME", "BOOL", "ANY", "GROUP", "FILE", "KEY", "INDEX", "BLOB",
    "MEMO", "VIEW", "REPORT",
};

static BUILTIN_FUNCTIONS: Set<&'static str> = phf_set! {
    "MESSAGE", "CLEAR", "OPEN", "CLOSE", "CREATE", "SET", "NEXT", "PREVIOUS", "GET",
    "PUT", "ADD", "DELETE", "FREE", "RECORDS", "POINTER", "SORT", "DISPLAY", "POST",
    "SELECT", "UPDATE", "CHANGE", "FORMAT", "DEFORMAT", "CLIP", "LEFT", "RIGHT", "UPPER",
    "LOWER", "SUB", "LEN", "INSTRING", "TODAY", "CLOCK", "INT", "ROUND", "ABS", "CHOOSE",
    "INLIST", "NUMERIC", "VAL", "CHR", "ERRORCODE", "ERROR", "FILEERROR", "BEEP", "HALT",
    "STOP", "ADDRESS", "NEW", "DISPOSE",
};

/// Length of the shortest token in any group.
pub const MIN_TOKEN_LEN: usize = 2;

/// Length of the longest token in any group.
pub const MAX_TOKEN_LEN: usize = 10;

/// A weighted category of Clarion tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordGroup {
    HardKeyword,
    SoftKeyword,
    TypeName,
    BuiltinFunction,
}

impl KeywordGroup {
    pub const ALL: [KeywordGroup; 4] = [
        KeywordGroup::HardKeyword,
        KeywordGroup::SoftKeyword,
        KeywordGroup::TypeName,
        KeywordGroup::BuiltinFunction,
    ];

    pub fn weight(self) -> u32 {
        match self {
            KeywordGroup::HardKeyword => 4,
            KeywordGroup::SoftKeyword => 2,
            KeywordGroup::TypeName => 2,
            KeywordGroup::BuiltinFunction => 1,
        }
    }

    pub fn tokens(self) -> &'static Set<&'static str> {
        match self {
            KeywordGroup::HardKeyword => &HARD_KEYWORDS,
            KeywordGroup::SoftKeyword => &SOFT_KEYWORDS,
            KeywordGroup::TypeName => &TYPE_NAMES,
            KeywordGroup::BuiltinFunction => &BUILTIN_FUNCTIONS,
        }
    }

    /// Find the group an upper-case word belongs to, if any
    pub fn of_token(upper: &str) -> Option<KeywordGroup> {
        Self::ALL.into_iter().find(|group| group.tokens().contains(upper))
    }

    pub fn name(self) -> &'static str {
        match self {
            KeywordGroup::HardKeyword => "hard-keyword",
            KeywordGroup::SoftKeyword => "soft-keyword",
            KeywordGroup::TypeName => "type-name",
            KeywordGroup::BuiltinFunction => "builtin-function",
        }
    }
}

/// Per-group match counts for one text fragment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub hard: u32,
    pub soft: u32,
    pub types: u32,
    pub functions: u32,
}

impl SignalCounts {
    pub fn get(&self, group: KeywordGroup) -> u32 {
        match group {
            KeywordGroup::HardKeyword => self.hard,
            KeywordGroup::SoftKeyword => self.soft,
            KeywordGroup::TypeName => self.types,
            KeywordGroup::BuiltinFunction => self.functions,
        }
    }

    fn bump(&mut self, group: KeywordGroup) {
        match group {
            KeywordGroup::HardKeyword => self.hard += 1,
            KeywordGroup::SoftKeyword => self.soft += 1,
            KeywordGroup::TypeName => self.types += 1,
            KeywordGroup::BuiltinFunction => self.functions += 1,
        }
    }

    /// Weighted sum of all counts
    pub fn score(&self) -> u32 {
        KeywordGroup::ALL
            .into_iter()
            .map(|group| group.weight() * self.get(group))
            .sum()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Iterate over maximal runs of word characters.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// Count whole-word, case-insensitive keyword occurrences for every group.
pub fn extract_signals(text: &str) -> SignalCounts {
    let mut counts = SignalCounts::default();
    // Reused across words; tokens are ASCII so a short buffer suffices
    let mut upper = String::with_capacity(MAX_TOKEN_LEN);

    for word in words(text) {
        if word.len() < MIN_TOKEN_LEN || word.len() > MAX_TOKEN_LEN || !word.is_ascii() {
            continue;
        }
        upper.clear();
        upper.extend(word.chars().map(|c| c.to_ascii_uppercase()));
        if let Some(group) = KeywordGroup::of_token(&upper) {
            counts.bump(group);
        }
    }

    counts
}
