//!
//! Combines keyword signals and veto filters into a single "looks like Clarion" decision.

use super::keywords::{MIN_TOKEN_LEN, SignalCounts, extract_signals};
use super::veto::{VetoSignal, detect_veto};

/// Minimum weighted score for a fragment to count as Clarion.
pub const MATCH_THRESHOLD: u32 = 8;

/// Outcome of classifying one fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_match: bool,
    /// Weighted keyword score; zero when a veto short-circuited scoring
    pub score: u32,
    pub counts: SignalCounts,
    pub veto: Option<VetoSignal>,
}

impl Classification {
    fn vetoed(veto: VetoSignal) -> Self {
        Self {
            veto: Some(veto),
            ..Self::default()
        }
    }
}

/// Classify a text fragment.
///
/// Surrounding whitespace is ignored. Vetoes are checked before any keyword scoring.
pub fn classify(text: &str) -> Classification {
    let text = text.trim();

    if text.len() < MIN_TOKEN_LEN {
        return Classification::default();
    }

    if let Some(veto) = detect_veto(text) {
        log::debug!("Classification vetoed: {veto}");
        return Classification::vetoed(veto);
    }

    let counts = extract_signals(text);
    let score = counts.score();

    Classification {
        is_match: score >= MATCH_THRESHOLD,
        score,
        counts,
        veto: None,
    }
}

/// Shorthand for `classify(text).is_match`.
pub fn is_clarion(text: &str) -> bool {
    classify(text).is_match
}
