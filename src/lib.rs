//! Envsync - Declarative environment variables for hosted deployments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write envsync.toml
//! │   ├── plan          # Show what apply would do
//! │   ├── apply         # Reconcile the remote
//! │   ├── refresh       # Rebuild recorded state from the remote
//! │   ├── destroy       # Delete every recorded variable
//! │   ├── status        # Quick overview
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # envsync.toml management
//!     ├── domain/       # Entry, EntrySet, RemoteEntry, OperationPlan
//!     ├── reconcile/    # Correlation, drift, engine, sequencer, settling
//!     ├── cycle         # Whole plan/apply/refresh/destroy cycles
//!     ├── remote/       # Remote trait, in-memory and file-backed planes
//!     ├── fingerprint/  # Fingerprint trait, in-memory and file stores
//!     ├── state         # Recorded state file
//!     └── validation    # Declared entry checks
//! ```
//!
//! # Features
//!
//! - Three-way reconciliation of declared, recorded and live variables
//! - Drift detection for write-only values through SHA-256 fingerprints
//! - Removals strictly before creations, with a pluggable settling policy
//! - Correlation that survives out-of-band recreation

pub mod cli;
pub mod core;
pub mod error;
