pub mod config;
pub mod decision;
pub mod detection;
pub mod document;
pub mod exit_codes;
pub mod fence;
pub mod preference;
pub mod prompt;
pub mod session;
pub mod toolbar;
pub mod utils;

pub use crate::decision::{DecisionEngine, PasteDecision, PromptResponse, PromptUi, WrapAction};
pub use crate::detection::{Classification, classify, is_clarion};
pub use crate::document::TextDocument;
pub use crate::preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, WrapPreference};
pub use crate::session::{PasteOutcome, PasteSessionController, SessionSettings};

use std::rc::Rc;

/// Build a paste controller from loaded settings and its two collaborators
pub fn paste_controller(
    settings: SessionSettings,
    store: Rc<dyn PreferenceStore>,
    prompt: Rc<dyn PromptUi>,
) -> Rc<PasteSessionController> {
    Rc::new(PasteSessionController::with_settings(
        DecisionEngine::new(store, prompt),
        settings,
    ))
}
