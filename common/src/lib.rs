//! # latmap common
//!
//! Shared models used by every crate of the workspace.
//!
//! * **[`catalog`]**: the ordered endpoint catalog and its default contents.
//! * **[`outcome`]**: per-endpoint probe outcomes and the batch they form.
//! * **[`report`]**: classification, baseline and the final immutable report.
//! * **[`geo`]**: coordinates and great-circle distance.
//! * **[`config`]**: runtime knobs for the probing engine.
//! * **[`error`]**: error enums shared across crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod outcome;
pub mod report;
