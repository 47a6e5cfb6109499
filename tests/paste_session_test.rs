mod common;

use clarion_fence_lib::decision::{PromptContext, PromptResponse, PromptUi};
use clarion_fence_lib::preference::{MemoryPreferenceStore, PreferenceStore, WrapPreference};
use clarion_fence_lib::session::{ClipboardSource, DocumentSink, IgnoreReason, PasteEvent, PasteOutcome, TEXT_PLAIN};
use clarion_fence_lib::{SessionSettings, TextDocument, WrapAction, paste_controller};
use common::{CLARION_SNIPPET, ScriptedPrompt, controller};
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use futures::task::noop_waker;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::future::Future;
use std::ops::Range;
use std::rc::Rc;
use std::task::{Context, Poll};

fn setup(prompt: ScriptedPrompt) -> (Rc<MemoryPreferenceStore>, Rc<ScriptedPrompt>, TextDocument) {
    let store = Rc::new(MemoryPreferenceStore::new());
    let prompt = Rc::new(prompt);
    let mut doc = TextDocument::new("");
    assert!(controller(&store, &prompt).attach(&mut doc));
    (store, prompt, doc)
}

#[test]
fn test_wrap_without_remember() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(true, false));

    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(
        doc.text(),
        "```clarion\nPROCEDURE Foo() CASE x OF 1 THEN RETURN END\n```"
    );
    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(prompt.last_text().as_deref(), Some(CLARION_SNIPPET));
    assert_eq!(store.get(), None);
    assert_eq!(doc.changes(), 1);
    assert_eq!(doc.selection(), doc.text().len()..doc.text().len());
}

#[test]
fn test_attach_is_idempotent() {
    let store = Rc::new(MemoryPreferenceStore::new());
    let prompt = Rc::new(ScriptedPrompt::new().then_answer(true, false).then_answer(true, false));
    let mut doc = TextDocument::new("");

    let first = controller(&store, &prompt);
    assert!(first.attach(&mut doc));
    assert!(!first.attach(&mut doc));
    // A second controller is also refused
    assert!(!controller(&store, &prompt).attach(&mut doc));
    assert_eq!(doc.listener_count(), 1);

    block_on(doc.paste(CLARION_SNIPPET));
    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(doc.changes(), 1);
    assert_eq!(doc.text().matches("```").count(), 2);
}

#[test]
fn test_caret_inside_open_fence_passes_through() {
    let store = Rc::new(MemoryPreferenceStore::new());
    let prompt = Rc::new(ScriptedPrompt::new().then_answer(true, true));
    let mut doc = TextDocument::new("Notes\n```clarion\n");
    controller(&store, &prompt).attach(&mut doc);

    let outcomes = block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::InsideFence)]);
    assert_eq!(doc.text(), format!("Notes\n```clarion\n{CLARION_SNIPPET}"));
    assert_eq!(prompt.times_asked(), 0);
}

#[test]
fn test_caret_after_closed_fence_is_intercepted() {
    let store = Rc::new(MemoryPreferenceStore::new());
    store.set(WrapPreference::Always).unwrap();
    let prompt = Rc::new(ScriptedPrompt::new());
    let mut doc = TextDocument::new("```\nold\n```\n");
    controller(&store, &prompt).attach(&mut doc);

    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(
        doc.text(),
        format!("```\nold\n```\n```clarion\n{CLARION_SNIPPET}\n```")
    );
}

#[test]
fn test_remembered_always_skips_prompt() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(true, true));

    block_on(doc.paste(CLARION_SNIPPET));
    assert_eq!(store.get(), Some(WrapPreference::Always));

    block_on(doc.paste("\n"));
    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(doc.text().matches("```clarion").count(), 2);
}

#[test]
fn test_remembered_never_inserts_raw_text() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(false, true));
    let clipboard = format!("  {CLARION_SNIPPET}\n");

    let outcomes = block_on(doc.paste(&clipboard));
    assert_eq!(store.get(), Some(WrapPreference::Never));
    assert_eq!(doc.text(), clipboard);

    let outcomes_again = block_on(doc.paste(&clipboard));
    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(doc.text(), clipboard.repeat(2));

    for outcome in outcomes.into_iter().chain(outcomes_again) {
        let PasteOutcome::Inserted(decision) = outcome else {
            panic!("expected the controller to insert, got {outcome:?}");
        };
        assert_eq!(decision.action, WrapAction::PassThrough);
    }
}

#[test]
fn test_reject_without_remember_asks_again() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(false, false).then_answer(false, false));

    block_on(doc.paste(CLARION_SNIPPET));
    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(prompt.times_asked(), 2);
    assert_eq!(store.get(), None);
    assert_eq!(doc.text(), CLARION_SNIPPET.repeat(2));
}

#[test]
fn test_dismissed_prompt_passes_through() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_dismiss());

    let outcomes = block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(store.get(), None);
    assert_eq!(doc.text(), CLARION_SNIPPET);
    assert!(matches!(outcomes[0], PasteOutcome::Inserted(d) if d.action == WrapAction::PassThrough));
}

#[test]
fn test_reset_returns_to_asking() {
    let (store, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(true, true).then_answer(false, false));

    block_on(doc.paste(CLARION_SNIPPET));
    store.clear().unwrap();
    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(prompt.times_asked(), 2);
    assert!(doc.text().ends_with(&format!("```{CLARION_SNIPPET}")));
}

#[test]
fn test_non_clarion_and_empty_pastes_use_default() {
    let (_, prompt, mut doc) = setup(ScriptedPrompt::new());

    let outcomes = block_on(doc.paste("just some prose, nothing to see"));
    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::NotClarion)]);

    let outcomes = block_on(doc.paste("   \n\t"));
    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::EmptyClipboard)]);

    assert_eq!(doc.text(), "just some prose, nothing to see   \n\t");
    assert_eq!(prompt.times_asked(), 0);
}

#[test]
fn test_vetoed_code_is_not_wrapped() {
    let (_, prompt, mut doc) = setup(ScriptedPrompt::new().then_answer(true, true));
    let c_like = "IF x THEN {\n  RETURN LOOP UNTIL END\n}";

    let outcomes = block_on(doc.paste(c_like));

    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::NotClarion)]);
    assert_eq!(doc.text(), c_like);
    assert_eq!(prompt.times_asked(), 0);
}

#[test]
fn test_html_only_clipboard_is_ignored() {
    struct HtmlOnly;
    impl ClipboardSource for HtmlOnly {
        fn data(&self, mime_type: &str) -> Option<String> {
            (mime_type != TEXT_PLAIN).then(|| format!("<pre>{CLARION_SNIPPET}</pre>"))
        }
    }

    let (_, prompt, mut doc) = setup(ScriptedPrompt::new());
    let outcomes = block_on(doc.paste(&HtmlOnly));

    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::EmptyClipboard)]);
    assert_eq!(doc.text(), "");
    assert_eq!(prompt.times_asked(), 0);
}

#[test]
fn test_selection_is_replaced() {
    let store = Rc::new(MemoryPreferenceStore::with_raw("always"));
    let prompt = Rc::new(ScriptedPrompt::new());
    let mut doc = TextDocument::new("before REPLACE after").with_selection(7..14);
    controller(&store, &prompt).attach(&mut doc);

    block_on(doc.paste(CLARION_SNIPPET));

    let expected = format!("before ```clarion\n{CLARION_SNIPPET}\n``` after");
    assert_eq!(doc.text(), expected);
    let caret = expected.len() - " after".len();
    assert_eq!(doc.selection(), caret..caret);
}

#[test]
fn test_disabled_controller_leaves_paste_alone() {
    let store = Rc::new(MemoryPreferenceStore::with_raw("always"));
    let prompt = Rc::new(ScriptedPrompt::new());
    let settings = SessionSettings {
        enabled: false,
        ..SessionSettings::default()
    };
    let mut doc = TextDocument::new("");
    paste_controller(settings, store, prompt).attach(&mut doc);

    let outcomes = block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(outcomes, vec![PasteOutcome::Ignored(IgnoreReason::Disabled)]);
    assert_eq!(doc.text(), CLARION_SNIPPET);
}

#[test]
fn test_custom_language_tag() {
    let store = Rc::new(MemoryPreferenceStore::with_raw("always"));
    let prompt = Rc::new(ScriptedPrompt::new());
    let settings = SessionSettings {
        language: "clw".to_string(),
        ..SessionSettings::default()
    };
    let mut doc = TextDocument::new("");
    paste_controller(settings, store, prompt).attach(&mut doc);

    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(doc.text(), format!("```clw\n{CLARION_SNIPPET}\n```"));
}

/// Prompt whose answer arrives over a channel
struct ChannelPrompt {
    receiver: RefCell<Option<oneshot::Receiver<Option<PromptResponse>>>>,
}

impl PromptUi for ChannelPrompt {
    fn ask<'a>(&'a self, _context: PromptContext<'a>) -> LocalBoxFuture<'a, Option<PromptResponse>> {
        let receiver = self.receiver.borrow_mut().take();
        Box::pin(async move {
            match receiver {
                Some(receiver) => receiver.await.ok().flatten(),
                None => None,
            }
        })
    }
}

/// Document sink that reports every splice to a shared log
struct RecordingSink {
    text: String,
    selection: Range<usize>,
    splices: Rc<RefCell<Vec<String>>>,
}

impl DocumentSink for RecordingSink {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: Range<usize>) {
        self.selection = range;
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.text.replace_range(range, replacement);
        self.splices.borrow_mut().push(replacement.to_string());
    }

    fn notify_changed(&mut self) {}
}

#[test]
fn test_document_untouched_while_prompt_is_open() {
    let (sender, receiver) = oneshot::channel();
    let prompt = Rc::new(ChannelPrompt {
        receiver: RefCell::new(Some(receiver)),
    });
    let store = Rc::new(MemoryPreferenceStore::new());
    let controller = paste_controller(SessionSettings::default(), store.clone(), prompt);

    let splices = Rc::new(RefCell::new(Vec::new()));
    let mut sink = RecordingSink {
        text: "Intro\n".to_string(),
        selection: 6..6,
        splices: splices.clone(),
    };
    let mut event = PasteEvent::from_clipboard(CLARION_SNIPPET);

    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    {
        let mut paste = Box::pin(controller.handle_paste(&mut event, &mut sink));

        assert!(paste.as_mut().poll(&mut cx).is_pending());
        assert!(paste.as_mut().poll(&mut cx).is_pending());
        assert!(splices.borrow().is_empty());

        sender
            .send(Some(PromptResponse {
                should_wrap: true,
                remember: true,
            }))
            .unwrap();

        let Poll::Ready(outcome) = paste.as_mut().poll(&mut cx) else {
            panic!("paste should complete once the prompt answers");
        };
        assert!(matches!(outcome, PasteOutcome::Inserted(d) if d.action == WrapAction::Wrap && d.remember));
    }

    assert!(event.is_default_prevented());
    assert_eq!(splices.borrow().len(), 1);
    assert_eq!(sink.text, format!("Intro\n```clarion\n{CLARION_SNIPPET}\n```"));
    assert_eq!(store.get(), Some(WrapPreference::Always));
}

#[test]
fn test_prompt_dropped_counts_as_dismissal() {
    let (sender, receiver) = oneshot::channel::<Option<PromptResponse>>();
    drop(sender);
    let prompt = Rc::new(ChannelPrompt {
        receiver: RefCell::new(Some(receiver)),
    });
    let store = Rc::new(MemoryPreferenceStore::new());
    let mut doc = TextDocument::new("");
    paste_controller(SessionSettings::default(), store.clone(), prompt).attach(&mut doc);

    block_on(doc.paste(CLARION_SNIPPET));

    assert_eq!(doc.text(), CLARION_SNIPPET);
    assert_eq!(store.get(), None);
}
