//! # Analysis Module
//!
//! Pure numerical routines over already-built structures.
//!
//! - **Neighbor Counting** ([`coordination`]) - First-nearest-neighbor shells
//!   and coordination numbers under a bond-length tolerance band.
//! - **Generalized Coordination** ([`gcn`]) - The GCN of a surface site,
//!   normalized against a bulk-equivalent site.
//! - **Site Identification** ([`sites`]) - Locating surface and
//!   bulk-interior sites by stable geometric coordinates.
//! - **Vibrations** ([`vibrations`]) - Displacement and mode
//!   characterization of vibration trajectories.
//!
//! Nothing in this layer constructs structures or performs I/O; all
//! functions are deterministic computations over caller-supplied data.

pub mod coordination;
pub mod error;
pub mod gcn;
pub mod sites;
pub mod vibrations;
