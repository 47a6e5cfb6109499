//!
//! Heuristic detection of Clarion source text.
//!
//! Detection is split into three layers: keyword signal extraction, veto filters for
//! brace-delimited languages and SQL, and the classifier that combines both into a single
//! decision.

pub mod classifier;
pub mod keywords;
pub mod veto;

pub use classifier::{Classification, MATCH_THRESHOLD, classify, is_clarion};
pub use keywords::{KeywordGroup, SignalCounts, extract_signals};
pub use veto::{VetoSignal, detect_veto, has_brace_shape, has_sql_shape};
