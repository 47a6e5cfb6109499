//! Shared helpers for paste-session integration tests.
#![allow(dead_code)]

use clarion_fence_lib::decision::{PromptContext, PromptResponse, PromptUi};
use clarion_fence_lib::preference::MemoryPreferenceStore;
use clarion_fence_lib::session::PasteSessionController;
use clarion_fence_lib::{SessionSettings, paste_controller};
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Prompt that replays queued answers and records what it was asked.
///
/// An exhausted queue behaves like a dismissed dialog.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<Option<PromptResponse>>>,
    asked: Cell<usize>,
    last_text: RefCell<Option<String>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_answer(self, should_wrap: bool, remember: bool) -> Self {
        self.answers
            .borrow_mut()
            .push_back(Some(PromptResponse { should_wrap, remember }));
        self
    }

    pub fn then_dismiss(self) -> Self {
        self.answers.borrow_mut().push_back(None);
        self
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.borrow().clone()
    }
}

impl PromptUi for ScriptedPrompt {
    fn ask<'a>(&'a self, context: PromptContext<'a>) -> LocalBoxFuture<'a, Option<PromptResponse>> {
        self.asked.set(self.asked.get() + 1);
        *self.last_text.borrow_mut() = Some(context.text.to_string());
        let answer = self.answers.borrow_mut().pop_front().flatten();
        Box::pin(async move { answer })
    }
}

/// A controller with default settings over the given store and prompt
pub fn controller(store: &Rc<MemoryPreferenceStore>, prompt: &Rc<ScriptedPrompt>) -> Rc<PasteSessionController> {
    paste_controller(SessionSettings::default(), store.clone(), prompt.clone())
}

/// Clarion text that scores well above the match threshold
pub const CLARION_SNIPPET: &str = "PROCEDURE Foo() CASE x OF 1 THEN RETURN END";
