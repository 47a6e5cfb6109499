//!
//! Toolbar actions: inserting an empty Clarion block, surrounding the selection with one,
//! and resetting the remembered wrap preference.

use crate::fence::{FENCE_MARKER, clamp_range, fence_opener};
use crate::preference::{PreferenceError, PreferenceStore};
use crate::session::DocumentSink;

/// Text placed inside a surrounded block when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Clarion code here";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Insert an empty block and put the caret inside it
    InsertBlock,
    /// Surround the selection (or a placeholder) with a block
    Surround,
    /// Forget the remembered wrap preference
    ResetPreference,
}

/// Replace the selection with an empty fenced block, caret on its blank line.
pub fn insert_block(document: &mut dyn DocumentSink, language: &str) {
    let opener = fence_opener(language);
    let block = format!("{opener}\n\n{FENCE_MARKER}");
    let selection = clamp_range(document.text(), document.selection());
    // Just after the opener's newline, before "\n```"
    let caret = selection.start + opener.len() + 1;

    document.splice(selection, &block);
    document.set_selection(caret..caret);
    document.notify_changed();
}

/// Surround the selection with a fenced block and select the inner text.
///
/// An empty selection is replaced by `placeholder`, which ends up selected so typing
/// overwrites it.
pub fn surround_selection(document: &mut dyn DocumentSink, language: &str, placeholder: &str) {
    let selection = clamp_range(document.text(), document.selection());
    let inner = if selection.is_empty() {
        placeholder.to_string()
    } else {
        document.text()[selection.clone()].to_string()
    };

    let opener = fence_opener(language);
    let block = format!("{opener}\n{inner}\n{FENCE_MARKER}");
    let inner_start = selection.start + opener.len() + 1;

    document.splice(selection, &block);
    document.set_selection(inner_start..inner_start + inner.len());
    document.notify_changed();
}

pub fn reset_preference(store: &dyn PreferenceStore) -> Result<(), PreferenceError> {
    store.clear()?;
    log::debug!("[clarion-fence] Wrap preference reset from toolbar");
    Ok(())
}

/// Run a toolbar action
pub fn perform(
    action: ToolbarAction,
    document: &mut dyn DocumentSink,
    store: &dyn PreferenceStore,
    language: &str,
) -> Result<(), PreferenceError> {
    match action {
        ToolbarAction::InsertBlock => insert_block(document, language),
        ToolbarAction::Surround => surround_selection(document, language, DEFAULT_PLACEHOLDER),
        ToolbarAction::ResetPreference => reset_preference(store)?,
    }
    Ok(())
}
