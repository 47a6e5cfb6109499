//!
//! Line ending handling for documents and clipboard files read from disk.
//!
//! Everything inside the crate works on LF text. Files are normalised on the way in and
//! converted back to their original ending on the way out.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Crlf,
    Mixed,
}

impl LineEnding {
    pub fn detect(content: &str) -> Self {
        let crlf = content.matches("\r\n").count();
        let lf = content.matches('\n').count() - crlf;

        match (crlf > 0, lf > 0) {
            (true, true) => LineEnding::Mixed,
            (true, false) => LineEnding::Crlf,
            _ => LineEnding::Lf,
        }
    }

    /// The ending to write back; mixed files get whichever ending dominates
    fn target_for(original: &str) -> Self {
        match Self::detect(original) {
            LineEnding::Mixed => {
                let crlf = original.matches("\r\n").count();
                let lf = original.matches('\n').count() - crlf;
                if crlf > lf { LineEnding::Crlf } else { LineEnding::Lf }
            }
            ending => ending,
        }
    }
}

pub fn normalize_to_lf(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Convert LF `modified` text back to the line ending used by `original`.
pub fn restore_line_endings(original: &str, modified: &str) -> String {
    match LineEnding::target_for(original) {
        LineEnding::Crlf => normalize_to_lf(modified).replace('\n', "\r\n"),
        _ => normalize_to_lf(modified),
    }
}
