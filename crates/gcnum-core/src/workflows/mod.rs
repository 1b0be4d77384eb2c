//! # Workflows Module
//!
//! High-level entry points that orchestrate complete calculations.
//!
//! ## Overview
//!
//! Workflows tie the structure builders and the analysis routines together:
//! they build the slab, identify the requested site, replicate the model,
//! and evaluate the coordination analysis, reporting progress along the way.
//! Library users who do not need to compose the lower layers themselves
//! should start here.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Calculation parameters with TOML
//!   loading and a validating builder.
//! - **Progress Monitoring** ([`progress`]) - Callback-based phase
//!   reporting for long-running calculations.
//! - **GCN Workflow** ([`gcn`]) - The generalized-coordination-number
//!   calculation from lattice parameters to a full site report.

pub mod config;
pub mod gcn;
pub mod progress;
