//! Data structures representing periodic atomic structures.
//!
//! The central type is [`structure::AtomicStructure`], an ordered sequence of
//! [`atom::Atom`]s in a periodic [`cell::Cell`]. Atoms are addressed by their
//! position in the sequence; all analysis routines identify sites by these
//! indices, so the order is stable and never reshuffled by any operation in
//! this crate.

pub mod atom;
pub mod cell;
pub mod lattice;
pub mod structure;
