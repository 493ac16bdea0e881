//! Core library components.
//!
//! This module contains the reconciliation engine and everything it reads
//! from or writes to: configuration, recorded state, fingerprints and the
//! remote control plane.

pub mod config;
pub mod constants;
pub mod cycle;
pub mod domain;
pub mod fingerprint;
pub mod reconcile;
pub mod remote;
pub mod state;
pub mod types;
pub mod validation;
