//! # cp-core
//!
//! Core types, error definitions, and configuration for capacity-planner.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace – the error hierarchy, the release
//! [`Milestone`] identifiers, and the [`PlannerConfig`] loaded from TOML.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Release milestone identifiers.
pub mod milestone;

/// Planner configuration (allowances, milestone gaps, company blocks).
pub mod settings;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use milestone::Milestone;
pub use settings::{CompanyBlock, MilestoneGaps, PlannerConfig};
