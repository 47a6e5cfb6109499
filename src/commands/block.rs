//! Handler for the `block` command.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use clarion_fence_lib::config::Config;
use clarion_fence_lib::document::TextDocument;
use clarion_fence_lib::exit_codes::SUCCESS;
use clarion_fence_lib::session::DocumentSink;
use clarion_fence_lib::toolbar::{self, ToolbarAction};
use clarion_fence_lib::utils::line_ending::{normalize_to_lf, restore_line_endings};

use super::{open_store, read_document};
use crate::Position;

pub fn handle_block(document: &Path, position: Position, surround: bool, dry_run: bool, config: &Config) -> Result<i32> {
    let original = read_document(document)?;
    let text = normalize_to_lf(&original);
    let selection = position.resolve(&text)?;

    let mut doc = TextDocument::new(text).with_selection(selection);
    let action = if surround {
        ToolbarAction::Surround
    } else {
        ToolbarAction::InsertBlock
    };
    let store = open_store(config);
    toolbar::perform(action, &mut doc, store.as_ref(), &config.global.language)?;

    let output = restore_line_endings(&original, doc.text());
    if dry_run {
        print!("{output}");
    } else {
        fs::write(document, output).with_context(|| format!("Failed to write {}", document.display()))?;
        eprintln!("{} {}", "Inserted block into".green().bold(), document.display());
    }

    Ok(SUCCESS)
}
