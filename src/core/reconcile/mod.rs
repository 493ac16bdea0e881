//! Reconciliation of declared entries against a remote.
//!
//! ```text
//! declared + recorded + live ──► engine::reconcile ──► OperationPlan
//!                                    │ DriftDetector (fingerprints)
//! OperationPlan ──► ChangeSequencer ──► deletes → Settle → create batch
//! ```

mod correlate;
mod drift;
mod engine;
mod refresh;
mod sequencer;
mod settle;

pub use correlate::{correlate, Correlation};
pub use drift::DriftDetector;
pub use engine::reconcile;
pub use refresh::refresh;
pub use sequencer::{CancelToken, ChangeSequencer};
pub use settle::{FixedDelay, NoDelay, PollUntilAbsent, Settle};
