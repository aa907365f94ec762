//! core
//!
//! Core domain types, ranking, and configuration for ict.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TargetLabel
//! - [`suggest`] - "Did you mean" ranking for missing targets
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Workspace discovery and ict storage paths
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Ranking is deterministic

pub mod config;
pub mod paths;
pub mod suggest;
pub mod types;
