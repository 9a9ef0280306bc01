//! Core orchestration logic for repo-analyzer
//!
//! This module holds the domain types and the batch pipeline. All external
//! interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Repository, CheckResult, SupportTier, Version)
//! - `services/` - Filter, dispatcher, aggregator and run pipeline
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
