//! Domain types.

mod entry;
mod entry_set;
mod plan;
mod remote_entry;
mod subject;

pub use entry::{Entry, MatchKey, SecretValue, Target};
pub use entry_set::EntrySet;
pub use plan::{Ambiguity, FingerprintUpdate, OperationPlan, ReplaceReason};
pub use remote_entry::{RemoteEntry, ValueKind};
pub use subject::Subject;
