//! # gcnum Core Library
//!
//! A library for coordination-number and generalized-coordination-number (GCN)
//! analysis of crystal surfaces, with the slab/bulk model construction the
//! analysis depends on.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`AtomicStructure`, `Cell`, `LatticeKind`) and the structure-building
//!   capability (`SlabBuilder`) that cuts crystallographic facets from
//!   conventional bulk cells.
//!
//! - **[`analysis`]: The Numerical Core.** Pure computations over
//!   already-built structures: first-nearest-neighbor shell counting,
//!   generalized coordination numbers, and vibration-trajectory
//!   characterization. Nothing in this layer performs I/O or holds state.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the builders and the analysis together to execute complete
//!   calculations, such as the GCN of an adsorption site on a chosen facet.
//!   It provides a simple and powerful entry point for end-users of the library.

pub mod analysis;
pub mod core;
pub mod workflows;
