use super::error::BuildError;
use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;

/// Defines the structure-building capability the analysis layer depends on.
///
/// The coordination and GCN routines never construct crystals themselves;
/// they consume this narrow interface, so alternative builders (different
/// conventional cells, externally relaxed geometries) can be substituted
/// without touching the analysis code.
pub trait SlabBuilder {
    /// Builds a bulk conventional cell for the given element and lattice.
    ///
    /// # Arguments
    ///
    /// * `element` - The element symbol for every atom in the cell.
    /// * `lattice` - The crystal lattice kind.
    /// * `lattice_parameter` - The conventional cubic cell edge in Angstroms.
    ///
    /// # Errors
    ///
    /// Returns an error if the lattice parameter is not positive.
    fn build_bulk(
        &self,
        element: &str,
        lattice: LatticeKind,
        lattice_parameter: f64,
    ) -> Result<AtomicStructure, BuildError>;

    /// Cuts a vacuum-padded slab exposing the given facet from a bulk cell.
    ///
    /// # Arguments
    ///
    /// * `bulk` - The bulk structure to cut, periodic in all directions.
    /// * `facet` - The Miller indices (h, k, l) of the exposed plane.
    /// * `layers` - The number of stacked repetitions along the surface normal.
    /// * `vacuum` - Vacuum padding in Angstroms added on each side of the slab.
    ///
    /// # Errors
    ///
    /// Returns an error for the (0, 0, 0) facet, a zero layer count, or a
    /// degenerate bulk cell.
    fn cut_surface(
        &self,
        bulk: &AtomicStructure,
        facet: (i32, i32, i32),
        layers: usize,
        vacuum: f64,
    ) -> Result<AtomicStructure, BuildError>;
}
