//! Construction of bulk and slab models.
//!
//! The analysis layer consumes structures through the narrow
//! [`traits::SlabBuilder`] capability; [`ConventionalCellBuilder`] is the
//! built-in implementation based on cubic conventional cells and a general
//! Miller-index surface cut.

pub mod bulk;
pub mod error;
pub mod stack;
pub mod surface;
pub mod traits;

use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;
use error::BuildError;
use traits::SlabBuilder;

/// The default structure builder, based on cubic conventional cells.
///
/// Bulk models are the 4-atom (fcc) or 2-atom (bcc) conventional cubic
/// cells; surfaces are cut with the unimodular-basis construction in
/// [`surface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalCellBuilder;

impl SlabBuilder for ConventionalCellBuilder {
    fn build_bulk(
        &self,
        element: &str,
        lattice: LatticeKind,
        lattice_parameter: f64,
    ) -> Result<AtomicStructure, BuildError> {
        bulk::cubic_bulk(element, lattice, lattice_parameter)
    }

    fn cut_surface(
        &self,
        bulk: &AtomicStructure,
        facet: (i32, i32, i32),
        layers: usize,
        vacuum: f64,
    ) -> Result<AtomicStructure, BuildError> {
        surface::cut_surface(bulk, facet, layers, vacuum)
    }
}
