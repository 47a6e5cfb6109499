//!
//! Fenced code block helpers: building a fence around text and deciding whether a caret
//! already sits inside an open fence.

use std::ops::Range;

/// The fence marker used for both opening and closing lines.
pub const FENCE_MARKER: &str = "```";

/// Language tag written after the opening fence when none is configured.
pub const DEFAULT_LANGUAGE: &str = "clarion";

/// Whether a line is a bare fence marker, optionally followed by a language tag.
///
/// Inline spans such as ```` ```x``` ```` are not fence lines.
pub fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE_MARKER) else {
        return false;
    };
    !rest.contains('`') && !rest.contains(char::is_whitespace)
}

/// Fence state at a caret offset, derived from the text before the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretFenceState {
    /// Fence lines between the start of the document and the caret
    pub fence_lines_before: usize,
}

impl CaretFenceState {
    /// Scan `text` up to `caret` (a byte offset, clamped to the text) for fence lines.
    ///
    /// The partial line the caret sits on counts, so a fence the user is still typing
    /// opens a block.
    pub fn at(text: &str, caret: usize) -> Self {
        let end = floor_char_boundary(text, caret);
        let fence_lines_before = text[..end].lines().filter(|line| is_fence_line(line)).count();
        Self { fence_lines_before }
    }

    /// Odd fence count: the caret is inside an open block.
    pub fn is_inside(&self) -> bool {
        self.fence_lines_before % 2 == 1
    }
}

/// Shorthand for `CaretFenceState::at(text, caret).is_inside()`.
pub fn caret_in_open_fence(text: &str, caret: usize) -> bool {
    CaretFenceState::at(text, caret).is_inside()
}

/// Opening fence line (without newline) for a language.
pub fn fence_opener(language: &str) -> String {
    format!("{FENCE_MARKER}{language}")
}

/// Surround `body` with an opening fence naming `language` and a closing fence.
pub fn wrap_in_fence(body: &str, language: &str) -> String {
    format!("{}\n{body}\n{FENCE_MARKER}", fence_opener(language))
}

/// Keep a range inside `text`, on char boundaries, with start <= end.
pub fn clamp_range(text: &str, range: Range<usize>) -> Range<usize> {
    let start = floor_char_boundary(text, range.start.min(range.end));
    let end = floor_char_boundary(text, range.end.max(range.start));
    start..end
}

/// Largest char boundary not after `offset`.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut end = offset;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
