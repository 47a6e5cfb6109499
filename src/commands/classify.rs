//! Handler for the `classify` command.

use anyhow::Result;
use colored::*;
use std::path::Path;

use clarion_fence_lib::detection::{KeywordGroup, MATCH_THRESHOLD, classify};
use clarion_fence_lib::exit_codes::{NOT_CLARION, SUCCESS};
use clarion_fence_lib::utils::line_ending::normalize_to_lf;

use super::read_input;

/// Classify a file or stdin and report the score breakdown.
pub fn handle_classify(file: Option<&Path>, quiet: bool) -> Result<i32> {
    let text = normalize_to_lf(&read_input(file)?);
    let result = classify(&text);

    if !quiet {
        if let Some(veto) = result.veto {
            println!("{} ({} detected)", "Not Clarion".yellow().bold(), veto);
        } else if result.is_match {
            println!(
                "{} (score {}, threshold {})",
                "Clarion".green().bold(),
                result.score,
                MATCH_THRESHOLD
            );
        } else {
            println!(
                "{} (score {}, threshold {})",
                "Not Clarion".yellow().bold(),
                result.score,
                MATCH_THRESHOLD
            );
        }

        if result.veto.is_none() {
            for group in KeywordGroup::ALL {
                let count = result.counts.get(group);
                if count > 0 {
                    println!(
                        "  {:<18} {} x {}",
                        group.name().dimmed(),
                        count,
                        group.weight()
                    );
                }
            }
        }
    }

    Ok(if result.is_match { SUCCESS } else { NOT_CLARION })
}
