//! Handler for the `paste` command.

use anyhow::{Context, Result, bail};
use colored::*;
use futures::executor::block_on;
use std::fs;
use std::rc::Rc;

use clarion_fence_lib::config::Config;
use clarion_fence_lib::decision::{PromptUi, WrapAction};
use clarion_fence_lib::document::TextDocument;
use clarion_fence_lib::exit_codes::SUCCESS;
use clarion_fence_lib::paste_controller;
use clarion_fence_lib::prompt::{FixedPrompt, TerminalPrompt};
use clarion_fence_lib::session::{DocumentSink, IgnoreReason, PasteOutcome};
use clarion_fence_lib::utils::line_ending::{normalize_to_lf, restore_line_endings};

use super::{open_store, read_document, read_input};
use crate::{Answer, PasteArgs};

fn prompt_for(args: &PasteArgs) -> Rc<dyn PromptUi> {
    match args.answer {
        Some(Answer::Wrap) => Rc::new(FixedPrompt::answer(true, args.remember)),
        Some(Answer::Plain) => Rc::new(FixedPrompt::answer(false, args.remember)),
        Some(Answer::Dismiss) => Rc::new(FixedPrompt::dismiss()),
        None => Rc::new(TerminalPrompt::stdio()),
    }
}

fn describe(outcome: PasteOutcome) -> String {
    match outcome {
        PasteOutcome::Inserted(decision) => match decision.action {
            WrapAction::Wrap => "Pasted inside a fenced block".green().bold().to_string(),
            WrapAction::PassThrough => "Pasted as plain text".yellow().bold().to_string(),
        },
        PasteOutcome::Ignored(reason) => {
            let why = match reason {
                IgnoreReason::Disabled => "interception disabled",
                IgnoreReason::EmptyClipboard => "clipboard empty",
                IgnoreReason::InsideFence => "caret already inside a fenced block",
                IgnoreReason::NotClarion => "not Clarion source",
            };
            format!("{} ({why})", "Pasted as plain text".bold())
        }
    }
}

/// Simulate a paste of the clipboard file into the document.
pub fn handle_paste(args: &PasteArgs, config: &Config) -> Result<i32> {
    let reads_stdin = args.clipboard.as_os_str() == "-";
    if reads_stdin && args.answer.is_none() {
        bail!("Reading the clipboard from stdin needs --answer, since stdin cannot also answer the prompt");
    }

    let clipboard = normalize_to_lf(&read_input(Some(args.clipboard.as_path()))?);
    let original = read_document(&args.document)?;
    let text = normalize_to_lf(&original);
    let selection = args.position.resolve(&text)?;

    let mut doc = TextDocument::new(text).with_selection(selection);
    let controller = paste_controller(config.session_settings(), open_store(config), prompt_for(args));
    controller.attach(&mut doc);

    let outcomes = block_on(doc.paste(&clipboard));
    for outcome in outcomes {
        eprintln!("{}", describe(outcome));
    }

    let output = restore_line_endings(&original, doc.text());
    if args.dry_run {
        print!("{output}");
    } else if doc.changes() > 0 {
        fs::write(&args.document, output).with_context(|| format!("Failed to write {}", args.document.display()))?;
    }

    Ok(SUCCESS)
}
