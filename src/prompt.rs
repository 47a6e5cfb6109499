//!
//! Front-ends for the wrap prompt.
//!
//! [`TerminalPrompt`] asks on a terminal (or any reader/writer pair); [`FixedPrompt`]
//! answers every prompt the same way, for non-interactive runs.

use colored::*;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::io::{self, BufRead, Write};

use crate::decision::{PromptContext, PromptResponse, PromptUi};

/// Lines of the pasted text shown before the question.
const PREVIEW_LINES: usize = 5;

/// Answers every prompt with the same response
#[derive(Debug, Default)]
pub struct FixedPrompt {
    response: Option<PromptResponse>,
    asked: Cell<usize>,
}

impl FixedPrompt {
    pub fn answer(should_wrap: bool, remember: bool) -> Self {
        Self {
            response: Some(PromptResponse { should_wrap, remember }),
            asked: Cell::new(0),
        }
    }

    /// Behave like a dialog the user closes without answering
    pub fn dismiss() -> Self {
        Self::default()
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl PromptUi for FixedPrompt {
    fn ask<'a>(&'a self, _context: PromptContext<'a>) -> LocalBoxFuture<'a, Option<PromptResponse>> {
        self.asked.set(self.asked.get() + 1);
        let response = self.response;
        Box::pin(async move { response })
    }
}

/// Yes/no answer parsed from a line of input
fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Interactive prompt over a line-oriented reader and a writer
pub struct TerminalPrompt {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
}

impl TerminalPrompt {
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: RefCell::new(Box::new(input)),
            output: RefCell::new(Box::new(output)),
        }
    }

    /// Prompt on stderr, read answers from the controlling terminal's stdin
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stderr())
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }

    fn ask_blocking(&self, context: &PromptContext<'_>) -> io::Result<Option<PromptResponse>> {
        {
            let mut out = self.output.borrow_mut();
            writeln!(
                out,
                "{} (score {})",
                "Pasted text looks like Clarion source".cyan().bold(),
                context.score
            )?;
            for line in context.text.lines().take(PREVIEW_LINES) {
                writeln!(out, "  {}", line.dimmed())?;
            }
            if context.text.lines().count() > PREVIEW_LINES {
                writeln!(out, "  {}", "...".dimmed())?;
            }
            write!(out, "Wrap it in a ```{} block? [y/n] ", context.language)?;
            out.flush()?;
        }

        let Some(should_wrap) = self.read_line()?.as_deref().and_then(parse_yes_no) else {
            return Ok(None);
        };

        {
            let mut out = self.output.borrow_mut();
            write!(out, "Remember this choice? [y/N] ")?;
            out.flush()?;
        }
        let remember = self
            .read_line()?
            .as_deref()
            .and_then(parse_yes_no)
            .unwrap_or(false);

        Ok(Some(PromptResponse { should_wrap, remember }))
    }
}

impl PromptUi for TerminalPrompt {
    fn ask<'a>(&'a self, context: PromptContext<'a>) -> LocalBoxFuture<'a, Option<PromptResponse>> {
        Box::pin(async move {
            match self.ask_blocking(&context) {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("Prompt failed, treating as dismissed: {e}");
                    None
                }
            }
        })
    }
}
