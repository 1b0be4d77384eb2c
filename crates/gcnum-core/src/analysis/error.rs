use crate::core::build::error::BuildError;
use crate::core::models::lattice::UnsupportedLatticeError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    UnsupportedLattice(#[from] UnsupportedLatticeError),

    #[error("unsupported site type '{requested}' (supported: ontop, bridge)")]
    UnsupportedSite { requested: String },

    #[error("site index {index} is out of range for a structure of {atom_count} atoms")]
    SiteIndexOutOfBounds { index: usize, atom_count: usize },

    #[error("no first-nearest neighbors found for site {site:?}")]
    NoNeighborsFound { site: Vec<usize> },

    #[error("structure has no atoms to identify a surface site in")]
    EmptySurface,

    #[error("no atom found at the expected lateral translation of the site")]
    SiteRelocationFailed,

    #[error("atoms {a} and {b} coincide; the bond direction is undefined")]
    CoincidentAtoms { a: usize, b: usize },

    #[error("trajectory of {frames} frames is too short to analyze")]
    TrajectoryTooShort { frames: usize },

    #[error("trajectory frame {frame} has {found} atoms, expected {expected}")]
    FrameMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error("structure building failed: {0}")]
    Build(#[from] BuildError),
}
