use super::coordination::BOND_TOLERANCE;
use super::error::AnalysisError;
use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;
use nalgebra::Point3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Atoms within this z distance of the topmost atom belong to the top layer.
const LAYER_TOL: f64 = 1e-6;

/// Maximum position mismatch when relocating a site by translation.
const MATCH_TOL: f64 = 1e-6;

/// The adsorption-site geometries supported by the GCN calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// A single surface atom.
    Ontop,
    /// Two adjacent same-layer surface atoms.
    Bridge,
}

impl FromStr for SiteKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ontop" => Ok(SiteKind::Ontop),
            "bridge" => Ok(SiteKind::Bridge),
            other => Err(AnalysisError::UnsupportedSite {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteKind::Ontop => write!(f, "ontop"),
            SiteKind::Bridge => write!(f, "bridge"),
        }
    }
}

/// Returns the indices of the atoms in the topmost layer of a slab.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySurface`] for an empty structure.
pub fn top_layer(structure: &AtomicStructure) -> Result<Vec<usize>, AnalysisError> {
    let max_z = structure.max_z().ok_or(AnalysisError::EmptySurface)?;
    Ok(structure
        .atoms()
        .iter()
        .enumerate()
        .filter(|(_, a)| (max_z - a.position.z) < LAYER_TOL)
        .map(|(i, _)| i)
        .collect())
}

/// Picks the canonical site anchor: the top-layer atom at the extremal
/// lateral corner, i.e. the lexicographic (x, y) maximum.
pub fn corner_anchor(structure: &AtomicStructure, top: &[usize]) -> Result<usize, AnalysisError> {
    top.iter()
        .copied()
        .max_by(|&i, &j| {
            let (a, b) = (structure.position(i), structure.position(j));
            match (a, b) {
                (Some(a), Some(b)) => lateral_cmp(&a, &b),
                _ => std::cmp::Ordering::Equal,
            }
        })
        .ok_or(AnalysisError::EmptySurface)
}

fn lateral_cmp(a: &Point3<f64>, b: &Point3<f64>) -> std::cmp::Ordering {
    if (a.x - b.x).abs() > MATCH_TOL {
        a.x.total_cmp(&b.x)
    } else {
        a.y.total_cmp(&b.y)
    }
}

/// Finds the anchor's nearest same-layer first-neighbor to complete a
/// bridge site.
///
/// # Errors
///
/// Returns [`AnalysisError::NoNeighborsFound`] if no top-layer atom lies
/// within the bond tolerance band of the anchor. This happens for lattices
/// and facets whose first neighbors are out of plane.
pub fn bridge_partner(
    structure: &AtomicStructure,
    lattice: LatticeKind,
    lattice_parameter: f64,
    anchor: usize,
    top: &[usize],
) -> Result<usize, AnalysisError> {
    let bond = lattice.reference_bond(lattice_parameter);
    for &j in top {
        if j == anchor {
            continue;
        }
        if let Some(dist) = structure.distance(anchor, j, true) {
            if (dist - bond).abs() <= BOND_TOLERANCE {
                return Ok(j);
            }
        }
    }
    Err(AnalysisError::NoNeighborsFound {
        site: vec![anchor],
    })
}

/// Finds the atom occupying a given position, within a tight tolerance.
///
/// Used to relocate sites identified before lateral replication into the
/// replicated structure: the site is tracked by its coordinates, never by
/// index arithmetic over the replication order.
///
/// # Errors
///
/// Returns [`AnalysisError::SiteRelocationFailed`] if no atom sits at the
/// target position.
pub fn atom_at(structure: &AtomicStructure, target: &Point3<f64>) -> Result<usize, AnalysisError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, atom) in structure.atoms().iter().enumerate() {
        let d = (atom.position - target).norm();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    match best {
        Some((i, d)) if d < MATCH_TOL => Ok(i),
        _ => Err(AnalysisError::SiteRelocationFailed),
    }
}

/// Identifies a bulk-interior site geometrically equivalent to the requested
/// site type: the atom closest to the slab's mid-height (ontop), paired with
/// one of its first neighbors for a bridge site.
///
/// Deep in the slab interior no surface truncation occurs, so the first
/// shell of this site gives the maximum attainable coordination for the
/// site type.
pub fn interior_bulk_site(
    structure: &AtomicStructure,
    lattice: LatticeKind,
    lattice_parameter: f64,
    kind: SiteKind,
) -> Result<Vec<usize>, AnalysisError> {
    let z_min = structure.min_z().ok_or(AnalysisError::EmptySurface)?;
    let z_max = structure.max_z().ok_or(AnalysisError::EmptySurface)?;
    let z_mid = (z_min + z_max) / 2.0;

    let mut anchor = 0usize;
    let mut best = f64::INFINITY;
    for (i, atom) in structure.atoms().iter().enumerate() {
        let d = (atom.position.z - z_mid).abs();
        if d < best {
            best = d;
            anchor = i;
        }
    }

    match kind {
        SiteKind::Ontop => Ok(vec![anchor]),
        SiteKind::Bridge => {
            let bond = lattice.reference_bond(lattice_parameter);
            for j in 0..structure.len() {
                if j == anchor {
                    continue;
                }
                if let Some(dist) = structure.distance(anchor, j, true) {
                    if (dist - bond).abs() <= BOND_TOLERANCE {
                        return Ok(vec![anchor, j]);
                    }
                }
            }
            Err(AnalysisError::NoNeighborsFound {
                site: vec![anchor],
            })
        }
    }
}
