//!
//! Paste interception for one editor surface.
//!
//! The host editor is reached only through small traits: a [`ClipboardSource`] for the
//! pasted payload, a [`DocumentSink`] for reading and splicing the document, and an
//! [`EditorSurface`] that carries the attach marker and dispatches paste events to
//! [`PasteListener`]s. The user is reached through a [`PromptUi`](crate::decision::PromptUi)
//! held by the [`DecisionEngine`].

use futures::future::LocalBoxFuture;
use std::ops::Range;
use std::rc::Rc;

use crate::decision::{DecisionEngine, PasteDecision, PromptContext, WrapAction};
use crate::detection::classify;
use crate::fence::{CaretFenceState, DEFAULT_LANGUAGE, clamp_range, wrap_in_fence};

/// The only clipboard representation consulted.
pub const TEXT_PLAIN: &str = "text/plain";

/// Marker set on a surface once a paste listener has been bound to it.
pub const ATTACH_MARKER: &str = "clarion-fence-paste-attached";

/// Clipboard contents of a paste, by MIME type
pub trait ClipboardSource {
    fn data(&self, mime_type: &str) -> Option<String>;
}

impl ClipboardSource for str {
    fn data(&self, mime_type: &str) -> Option<String> {
        (mime_type == TEXT_PLAIN).then(|| self.to_string())
    }
}

impl ClipboardSource for String {
    fn data(&self, mime_type: &str) -> Option<String> {
        self.as_str().data(mime_type)
    }
}

/// A single paste event
#[derive(Debug, Clone, Default)]
pub struct PasteEvent {
    text: Option<String>,
    default_prevented: bool,
}

impl PasteEvent {
    pub fn from_clipboard(clipboard: &(impl ClipboardSource + ?Sized)) -> Self {
        Self {
            text: clipboard.data(TEXT_PLAIN),
            default_prevented: false,
        }
    }

    /// Plain-text payload, if the clipboard had one
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Stop the host from performing its own paste
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The editable document behind a surface. Offsets are byte offsets.
pub trait DocumentSink {
    fn text(&self) -> &str;

    /// Current selection; empty when it is just a caret
    fn selection(&self) -> Range<usize>;

    fn set_selection(&mut self, range: Range<usize>);

    /// Replace `range` with `replacement`
    fn splice(&mut self, range: Range<usize>, replacement: &str);

    /// Tell dependants the content changed
    fn notify_changed(&mut self);
}

/// Something that reacts to paste events on a surface
pub trait PasteListener {
    fn on_paste<'a>(
        &'a self,
        event: &'a mut PasteEvent,
        document: &'a mut dyn DocumentSink,
    ) -> LocalBoxFuture<'a, PasteOutcome>;
}

/// An editor surface that listeners can be bound to
pub trait EditorSurface {
    fn has_marker(&self, marker: &str) -> bool;

    fn set_marker(&mut self, marker: &str);

    fn add_paste_listener(&mut self, listener: Rc<dyn PasteListener>);
}

/// Why a paste was left to the host's default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Disabled,
    EmptyClipboard,
    InsideFence,
    NotClarion,
}

/// What the controller did with a paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The host performs its default paste
    Ignored(IgnoreReason),
    /// The controller spliced the text itself
    Inserted(PasteDecision),
}

/// Settings shared by every paste a controller handles
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Language tag written on the opening fence
    pub language: String,
    /// When false, every paste is left to the host
    pub enabled: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            enabled: true,
        }
    }
}

/// Handles pastes for the surfaces it is attached to
pub struct PasteSessionController {
    engine: DecisionEngine,
    settings: SessionSettings,
}

impl PasteSessionController {
    pub fn new(engine: DecisionEngine) -> Self {
        Self::with_settings(engine, SessionSettings::default())
    }

    pub fn with_settings(engine: DecisionEngine, settings: SessionSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Bind this controller to `surface` unless a controller is already bound.
    ///
    /// Returns whether a listener was added.
    pub fn attach(self: &Rc<Self>, surface: &mut dyn EditorSurface) -> bool {
        if surface.has_marker(ATTACH_MARKER) {
            log::debug!("[clarion-fence] Surface already has a paste listener");
            return false;
        }
        surface.set_marker(ATTACH_MARKER);
        surface.add_paste_listener(self.clone());
        true
    }

    /// Handle one paste event against `document`.
    pub async fn handle_paste(&self, event: &mut PasteEvent, document: &mut dyn DocumentSink) -> PasteOutcome {
        if !self.settings.enabled {
            return PasteOutcome::Ignored(IgnoreReason::Disabled);
        }

        let Some(raw) = event.text().map(str::to_owned) else {
            return PasteOutcome::Ignored(IgnoreReason::EmptyClipboard);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return PasteOutcome::Ignored(IgnoreReason::EmptyClipboard);
        }

        let selection = clamp_range(document.text(), document.selection());
        if CaretFenceState::at(document.text(), selection.start).is_inside() {
            log::debug!("[clarion-fence] Caret inside an open fence, leaving paste alone");
            return PasteOutcome::Ignored(IgnoreReason::InsideFence);
        }

        let classification = classify(trimmed);
        if !classification.is_match {
            return PasteOutcome::Ignored(IgnoreReason::NotClarion);
        }

        event.prevent_default();

        let context = PromptContext {
            text: trimmed,
            score: classification.score,
            language: &self.settings.language,
        };
        let decision = self.engine.decide(context).await;

        let replacement = match decision.action {
            WrapAction::Wrap => wrap_in_fence(trimmed, &self.settings.language),
            WrapAction::PassThrough => raw.clone(),
        };

        // The document may have moved on while the prompt was open
        let range = clamp_range(document.text(), selection);
        let caret = range.start + replacement.len();
        document.splice(range, &replacement);
        document.set_selection(caret..caret);
        document.notify_changed();

        log::debug!("[clarion-fence] Inserted paste with {:?}", decision.action);
        PasteOutcome::Inserted(decision)
    }
}

impl PasteListener for PasteSessionController {
    fn on_paste<'a>(
        &'a self,
        event: &'a mut PasteEvent,
        document: &'a mut dyn DocumentSink,
    ) -> LocalBoxFuture<'a, PasteOutcome> {
        Box::pin(self.handle_paste(event, document))
    }
}
