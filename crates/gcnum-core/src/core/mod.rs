//! # Core Module
//!
//! Fundamental building blocks for surface-coordination analysis: the data
//! structures that represent periodic atomic structures and the builders that
//! construct bulk and slab models from them.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, periodic cells with
//!   minimum-image distance queries, ordered atomic structures, and the
//!   supported lattice kinds.
//! - **Model Construction** ([`build`]) - Conventional bulk cells, general
//!   Miller-index surface cuts with vacuum padding, and bulk-under-slab
//!   stacking.
//!
//! Everything here is stateless: structures are plain values constructed per
//! calculation and discarded afterwards.

pub mod build;
pub mod models;
