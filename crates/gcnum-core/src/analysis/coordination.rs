use super::error::AnalysisError;
use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;
use std::collections::BTreeSet;

/// Half-width of the tolerance band around the reference bond length.
///
/// A pair counts as first-nearest neighbors if and only if its minimum-image
/// distance lies within this band.
pub const BOND_TOLERANCE: f64 = 0.001;

/// Extra margin added to the bond length for the coarse z pre-filter.
const PREFILTER_MARGIN: f64 = 1.0;

/// The first-nearest-neighbor shell of a single queried atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCoordination {
    /// The queried atom index.
    pub site: usize,
    /// Indices of the first-nearest neighbors, in index order.
    pub neighbors: Vec<usize>,
}

impl SiteCoordination {
    /// Returns the coordination number of the queried atom.
    pub fn coordination(&self) -> usize {
        self.neighbors.len()
    }
}

/// Coordination numbers and neighbor shells for a set of queried atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinationResult {
    /// One entry per queried atom, in query order.
    pub sites: Vec<SiteCoordination>,
}

impl CoordinationResult {
    /// Returns the union of all neighbor shells, ordered by atom index.
    pub fn neighbor_union(&self) -> BTreeSet<usize> {
        self.sites
            .iter()
            .flat_map(|s| s.neighbors.iter().copied())
            .collect()
    }

    /// Returns the coordination number of a queried atom, if it was queried.
    pub fn coordination_of(&self, site: usize) -> Option<usize> {
        self.sites
            .iter()
            .find(|s| s.site == site)
            .map(|s| s.coordination())
    }
}

/// Computes coordination numbers and first-nearest-neighbor shells.
///
/// For each queried atom the remaining atoms are scanned; a pair counts when
/// its minimum-image distance lies within [`BOND_TOLERANCE`] of the lattice's
/// reference bond length. An atom is never its own neighbor.
///
/// For structures that are aperiodic along z (slabs), pairs whose raw z
/// separation exceeds the bond length plus a margin are skipped before the
/// minimum-image distance is evaluated. This is purely a short-circuit: no
/// pair inside the tolerance band can have a larger z separation, so the
/// filter never changes which pairs are counted. It is not applied to
/// z-periodic structures, where raw z separations say nothing about
/// minimum-image distances.
///
/// # Arguments
///
/// * `structure` - The structure to analyze.
/// * `lattice` - The crystal lattice kind, fixing the reference bond length.
/// * `lattice_parameter` - The conventional cubic cell edge in Angstroms.
/// * `sites` - The atom indices to query.
///
/// # Errors
///
/// Returns [`AnalysisError::SiteIndexOutOfBounds`] if a queried index does
/// not exist.
pub fn coordination_numbers(
    structure: &AtomicStructure,
    lattice: LatticeKind,
    lattice_parameter: f64,
    sites: &[usize],
) -> Result<CoordinationResult, AnalysisError> {
    let bond = lattice.reference_bond(lattice_parameter);
    let z_bound = if structure.cell().periodic()[2] {
        None
    } else {
        Some(bond + PREFILTER_MARGIN)
    };

    let mut result = CoordinationResult {
        sites: Vec::with_capacity(sites.len()),
    };
    for &i in sites {
        let pi = structure
            .position(i)
            .ok_or(AnalysisError::SiteIndexOutOfBounds {
                index: i,
                atom_count: structure.len(),
            })?;

        let mut neighbors = Vec::new();
        for (j, atom) in structure.atoms().iter().enumerate() {
            if j == i {
                continue;
            }
            if let Some(bound) = z_bound {
                if (pi.z - atom.position.z).abs() > bound {
                    continue;
                }
            }
            let dist = structure.cell().minimum_image_distance(&pi, &atom.position);
            if (dist - bond).abs() <= BOND_TOLERANCE {
                neighbors.push(j);
            }
        }
        result.sites.push(SiteCoordination { site: i, neighbors });
    }
    Ok(result)
}
