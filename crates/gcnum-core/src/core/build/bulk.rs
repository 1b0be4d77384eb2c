use super::error::BuildError;
use crate::core::models::atom::Atom;
use crate::core::models::cell::Cell;
use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;
use nalgebra::{Point3, Vector3};

/// Fractional basis positions of the fcc conventional cubic cell.
const FCC_BASIS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.0],
];

/// Fractional basis positions of the bcc conventional cubic cell.
const BCC_BASIS: [[f64; 3]; 2] = [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];

/// Builds the conventional cubic cell of an elemental fcc or bcc crystal.
///
/// # Arguments
///
/// * `element` - The element symbol for every atom in the cell.
/// * `lattice` - The crystal lattice kind.
/// * `lattice_parameter` - The cubic cell edge in Angstroms.
///
/// # Errors
///
/// Returns [`BuildError::InvalidLatticeParameter`] for a non-positive cell
/// edge.
pub fn cubic_bulk(
    element: &str,
    lattice: LatticeKind,
    lattice_parameter: f64,
) -> Result<AtomicStructure, BuildError> {
    if !(lattice_parameter > 0.0) || !lattice_parameter.is_finite() {
        return Err(BuildError::InvalidLatticeParameter {
            value: lattice_parameter,
        });
    }

    let basis: &[[f64; 3]] = match lattice {
        LatticeKind::Fcc => &FCC_BASIS,
        LatticeKind::Bcc => &BCC_BASIS,
    };

    let cell = Cell::cubic(lattice_parameter);
    let atoms = basis
        .iter()
        .map(|f| {
            let r = cell.cartesian(&Vector3::new(f[0], f[1], f[2]));
            Atom::new(element, Point3::from(r))
        })
        .collect();

    Ok(AtomicStructure::new(atoms, cell))
}
