//! Command handlers for the clarion-fence CLI.
//!
//! Each subcommand has its own module with a public handler function that `main()`
//! dispatches to. Handlers return the process exit code.

pub mod block;
pub mod classify;
pub mod config;
pub mod paste;
pub mod preference;

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::ops::Range;
use std::path::Path;
use std::rc::Rc;

use clarion_fence_lib::config::Config;
use clarion_fence_lib::preference::{MemoryPreferenceStore, PreferenceStore};

use crate::Position;

/// Read a file, or stdin for `-` / no path
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read from stdin")?;
            Ok(content)
        }
    }
}

/// Read a document, treating a missing file as empty
pub fn read_document(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// The configured durable store, or an in-memory one when no location is available
pub fn open_store(config: &Config) -> Rc<dyn PreferenceStore> {
    match config.preference_store() {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("No location for the wrap preference; choices will not be remembered");
            Rc::new(MemoryPreferenceStore::new())
        }
    }
}

/// Byte offset of a 1-based line and column (in characters) in LF text.
///
/// Columns past the end of a line clamp to the line end.
pub fn offset_of(text: &str, line: usize, column: usize) -> Result<usize> {
    if line == 0 || column == 0 {
        bail!("Line and column numbers start at 1");
    }

    let mut line_start = 0;
    for _ in 1..line {
        match text[line_start..].find('\n') {
            Some(pos) => line_start += pos + 1,
            None => bail!("Line {line} is past the end of the document"),
        }
    }

    let line_text = text[line_start..].split('\n').next().unwrap_or("");
    let within = line_text
        .char_indices()
        .nth(column - 1)
        .map_or(line_text.len(), |(idx, _)| idx);
    Ok(line_start + within)
}

impl Position {
    /// Resolve to a byte range in `text`; the end of the document when unset
    pub fn resolve(&self, text: &str) -> Result<Range<usize>> {
        let start = match (self.line, self.column) {
            (Some(line), Some(column)) => offset_of(text, line, column)?,
            _ => return Ok(text.len()..text.len()),
        };
        let end = match (self.end_line, self.end_column) {
            (Some(line), Some(column)) => offset_of(text, line, column)?,
            _ => start,
        };
        if end < start {
            bail!("Selection ends before it starts");
        }
        Ok(start..end)
    }
}
