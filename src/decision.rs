//!
//! The per-paste decision: wrap, pass through, or ask the user.
//!
//! A qualifying paste enters one of three states depending on the stored preference.
//! Only the `Ask` state suspends, awaiting the [`PromptUi`]; it is also the only state
//! that may write the preference back, and only when the user ticked "remember".

use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::preference::{PreferenceStore, WrapPreference};

/// What to insert for a paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapAction {
    /// Insert the text inside a fenced code block
    Wrap,
    /// Insert the text unchanged
    PassThrough,
}

/// Outcome of the decision engine for one paste. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteDecision {
    pub action: WrapAction,
    /// Whether the user asked for this answer to be remembered
    pub remember: bool,
}

impl PasteDecision {
    pub fn wrap() -> Self {
        Self {
            action: WrapAction::Wrap,
            remember: false,
        }
    }

    pub fn pass_through() -> Self {
        Self {
            action: WrapAction::PassThrough,
            remember: false,
        }
    }
}

/// The user's answer to the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptResponse {
    pub should_wrap: bool,
    pub remember: bool,
}

/// What the prompt is asked about
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// The pasted text, trimmed
    pub text: &'a str,
    pub score: u32,
    /// Fence language the text would be wrapped in
    pub language: &'a str,
}

/// Asynchronous yes/no question with an optional "remember this" flag.
///
/// Implementations resolve exactly once. `None` means the prompt was dismissed without an
/// answer, which is handled as "do not wrap, do not remember".
pub trait PromptUi {
    fn ask<'a>(&'a self, context: PromptContext<'a>) -> LocalBoxFuture<'a, Option<PromptResponse>>;
}

/// State a paste enters, fixed by the stored preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionState {
    ResolvedAlways,
    ResolvedNever,
    Ask,
}

impl DecisionState {
    pub fn from_preference(preference: Option<WrapPreference>) -> Self {
        match preference {
            Some(WrapPreference::Always) => DecisionState::ResolvedAlways,
            Some(WrapPreference::Never) => DecisionState::ResolvedNever,
            None => DecisionState::Ask,
        }
    }
}

/// Decides each qualifying paste against the shared preference store
#[derive(Clone)]
pub struct DecisionEngine {
    store: Rc<dyn PreferenceStore>,
    prompt: Rc<dyn PromptUi>,
}

impl DecisionEngine {
    pub fn new(store: Rc<dyn PreferenceStore>, prompt: Rc<dyn PromptUi>) -> Self {
        Self { store, prompt }
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    /// Run the state machine for one paste.
    pub async fn decide(&self, context: PromptContext<'_>) -> PasteDecision {
        let state = DecisionState::from_preference(self.store.get());
        log::debug!("[clarion-fence] Paste decision state: {state:?}");

        match state {
            DecisionState::ResolvedAlways => PasteDecision::wrap(),
            DecisionState::ResolvedNever => PasteDecision::pass_through(),
            DecisionState::Ask => {
                let Some(response) = self.prompt.ask(context).await else {
                    log::debug!("[clarion-fence] Prompt dismissed, passing text through");
                    return PasteDecision::pass_through();
                };
                self.resolve(response)
            }
        }
    }

    fn resolve(&self, response: PromptResponse) -> PasteDecision {
        if response.remember {
            let pref = WrapPreference::from_choice(response.should_wrap);
            // A failed write only loses the memory, not the paste
            if let Err(e) = self.store.set(pref) {
                log::warn!("Failed to remember wrap preference: {e}");
            }
        }

        PasteDecision {
            action: if response.should_wrap {
                WrapAction::Wrap
            } else {
                WrapAction::PassThrough
            },
            remember: response.remember,
        }
    }
}
