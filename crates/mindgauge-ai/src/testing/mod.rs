//! Guided-test orchestration.
//!
//! `TestRunner` drives a `ChatSession` through a bounded question/answer
//! loop, detects the model's conclusion, and hands the finalized result to
//! a `ResultSink`.

pub mod conclusion;
pub mod prompts;
mod runner;

use mindgauge_common::{StoreError, TestResult};

pub use conclusion::{is_conclusion, CONCLUSION_KEYWORDS};
pub use runner::{StepOutcome, TestPhase, TestRunner, QUESTION_CAP};

/// Destination for finalized test results. The stored record is keyed by an
/// auto-increment id, which `save` returns.
pub trait ResultSink: Send + Sync {
    fn save(&self, result: &TestResult) -> Result<u64, StoreError>;
}
