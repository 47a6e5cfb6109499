//!
//! An in-memory editor: a text buffer with a selection that doubles as an
//! [`EditorSurface`], dispatching paste events to bound listeners the way a browser
//! dispatches them to DOM handlers.

use std::collections::HashSet;
use std::ops::Range;
use std::rc::Rc;

use crate::fence::floor_char_boundary;
use crate::session::{ClipboardSource, DocumentSink, EditorSurface, PasteEvent, PasteListener, PasteOutcome};

#[derive(Default)]
pub struct TextDocument {
    text: String,
    selection: Range<usize>,
    markers: HashSet<String>,
    listeners: Vec<Rc<dyn PasteListener>>,
    changes: usize,
}

impl TextDocument {
    /// A document with the caret at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
            ..Self::default()
        }
    }

    /// Move the caret, clamped to the text
    pub fn with_caret(mut self, caret: usize) -> Self {
        let caret = floor_char_boundary(&self.text, caret);
        self.selection = caret..caret;
        self
    }

    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        self.set_selection(range);
        self
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of content-changed notifications received
    pub fn changes(&self) -> usize {
        self.changes
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch a paste to every bound listener, then perform the default paste unless
    /// one of them prevented it.
    pub async fn paste(&mut self, clipboard: &(impl ClipboardSource + ?Sized)) -> Vec<PasteOutcome> {
        let mut event = PasteEvent::from_clipboard(clipboard);
        let listeners = self.listeners.clone();
        let mut outcomes = Vec::with_capacity(listeners.len());

        for listener in listeners {
            outcomes.push(listener.on_paste(&mut event, self).await);
        }

        if !event.is_default_prevented()
            && let Some(text) = event.text()
        {
            let range = self.selection.clone();
            let caret = range.start + text.len();
            self.splice(range, text);
            self.set_selection(caret..caret);
            self.notify_changed();
        }

        outcomes
    }
}

impl DocumentSink for TextDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: Range<usize>) {
        let start = floor_char_boundary(&self.text, range.start);
        let end = floor_char_boundary(&self.text, range.end.max(start));
        self.selection = start..end;
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.text.replace_range(range, replacement);
    }

    fn notify_changed(&mut self) {
        self.changes += 1;
    }
}

impl EditorSurface for TextDocument {
    fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    fn set_marker(&mut self, marker: &str) {
        self.markers.insert(marker.to_string());
    }

    fn add_paste_listener(&mut self, listener: Rc<dyn PasteListener>) {
        self.listeners.push(listener);
    }
}
