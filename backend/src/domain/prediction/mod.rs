//! # Sleep Prediction Policy
//!
//! Produces a predicted next-sleep time, duration and confidence for a child.
//!
//! - **Primary path**: one structured-completion request carrying age-band
//!   guidance and the child's completed sleep history. Missing fields in the
//!   answer are replaced by fixed defaults.
//! - **Fallback path**: a fixed time-of-day rule table, used whenever the
//!   completion call fails for any reason. Confidence is always 0.7.
//!
//! Failures of the completion service never leave this module.

pub mod age_band;
pub mod completion;
pub mod fallback;
pub mod predictor;
pub mod prompt;

use chrono::{DateTime, Utc};

pub use completion::{CompletionClient, OpenAiCompletionClient};
pub use fallback::{fallback_prediction, FALLBACK_CONFIDENCE};
pub use predictor::SleepPredictor;

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    LanguageModel,
    RuleTable,
}

/// Result of a single prediction run, before it is persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub next_sleep_time: DateTime<Utc>,
    pub predicted_duration_minutes: i64,
    /// 0..1
    pub confidence: f64,
    pub source: PredictionSource,
}
