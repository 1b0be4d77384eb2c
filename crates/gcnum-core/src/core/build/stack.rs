use super::error::BuildError;
use crate::core::models::cell::Cell;
use crate::core::models::structure::AtomicStructure;
use nalgebra::Vector3;

const LATERAL_TOL: f64 = 1e-6;

/// Appends replicated bulk layers beneath a relaxed surface slab.
///
/// This builds very large slab models without relaxing them whole: the
/// already-relaxed surface region is lifted on top of a stack of bulk
/// repeat units, keeping the bulk's own interlayer separation at the
/// junction. The combined structure gets a resized stacking vector with
/// `vacuum` Angstroms of padding split evenly above and below.
///
/// Atom order in the result is bulk first, then the surface atoms in their
/// original order.
///
/// # Arguments
///
/// * `surface` - The relaxed surface slab.
/// * `bulk` - The bulk repeat unit, with the same lateral cell as the slab.
///   Note that the repeat unit of bulk in a slab is not necessarily the bulk
///   unit cell; the caller supplies the correct geometry.
/// * `layers` - Replications of the bulk unit along its stacking vector;
///   `None` appends the bulk as given.
/// * `vacuum` - Total vacuum in Angstroms added along z.
///
/// # Errors
///
/// Returns an error if either structure is empty, the lateral cell vectors
/// differ, or the bulk interlayer spacing cannot be determined.
pub fn append_bulk(
    surface: &AtomicStructure,
    bulk: &AtomicStructure,
    layers: Option<usize>,
    vacuum: f64,
) -> Result<AtomicStructure, BuildError> {
    if surface.is_empty() || bulk.is_empty() {
        return Err(BuildError::EmptyStructure);
    }
    for axis in 0..2 {
        if (surface.cell().vector(axis) - bulk.cell().vector(axis)).norm() > LATERAL_TOL {
            return Err(BuildError::IncompatibleCells { axis });
        }
    }

    let bulk = match layers {
        Some(0) => return Err(BuildError::NoLayers),
        Some(n) => bulk.repeat((1, 1, n)),
        None => bulk.clone(),
    };

    let separation = interlayer_separation(&bulk)?;

    // Lift the surface so it sits one bulk interlayer above the bulk stack.
    let bulk_top = bulk.max_z().ok_or(BuildError::EmptyStructure)?;
    let surface_bottom = surface.min_z().ok_or(BuildError::EmptyStructure)?;
    let z_shift = bulk_top - surface_bottom + separation;

    let mut atoms = bulk.atoms().to_vec();
    for atom in surface.atoms() {
        let mut lifted = atom.clone();
        lifted.position.z += z_shift;
        atoms.push(lifted);
    }

    let cell = Cell::new(
        [
            bulk.cell().vector(0),
            bulk.cell().vector(1),
            Vector3::new(0.0, 0.0, 0.0),
        ],
        [true, true, false],
    );
    let mut combined = AtomicStructure::new(atoms, cell);

    let z_min = combined.min_z().ok_or(BuildError::EmptyStructure)?;
    let z_max = combined.max_z().ok_or(BuildError::EmptyStructure)?;
    combined
        .cell_mut()
        .set_vector(2, Vector3::new(0.0, 0.0, z_max - z_min + vacuum));
    combined.translate(Vector3::new(0.0, 0.0, vacuum / 2.0 - z_min));

    Ok(combined)
}

/// Determines the spacing between consecutive layers of the bulk along z,
/// measured within the xy column of the first atom so lateral offsets
/// between sublattices do not contaminate the value.
fn interlayer_separation(bulk: &AtomicStructure) -> Result<f64, BuildError> {
    let first = bulk.atom(0).ok_or(BuildError::EmptyStructure)?;
    let (x0, y0) = (first.position.x, first.position.y);

    let mut column_z: Vec<f64> = bulk
        .atoms()
        .iter()
        .filter(|a| (a.position.x - x0).abs() < LATERAL_TOL && (a.position.y - y0).abs() < LATERAL_TOL)
        .map(|a| a.position.z)
        .collect();
    column_z.sort_by(|a, b| a.total_cmp(b));
    column_z.dedup_by(|a, b| (*a - *b).abs() < LATERAL_TOL);

    if column_z.len() >= 2 {
        return Ok(column_z[1] - column_z[0]);
    }

    // Single layer in the column: fall back to the stacking vector height.
    let c_z = bulk.cell().vector(2).z.abs();
    if c_z > LATERAL_TOL {
        Ok(c_z)
    } else {
        Err(BuildError::NoLayerSpacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build::bulk::cubic_bulk;
    use crate::core::build::surface::cut_surface;
    use crate::core::models::lattice::LatticeKind;

    fn slab_and_bulk_unit() -> (AtomicStructure, AtomicStructure) {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        let slab = cut_surface(&bulk, (1, 0, 0), 3, 10.0).unwrap();
        // For a (100) slab the conventional cubic cell shares the lateral
        // cell and serves as the bulk repeat unit.
        (slab, bulk)
    }

    #[test]
    fn appended_model_contains_both_parts_in_order() {
        let (slab, unit) = slab_and_bulk_unit();
        let stacked = append_bulk(&slab, &unit, Some(2), 10.0).unwrap();
        assert_eq!(stacked.len(), slab.len() + 2 * unit.len());
        // Bulk block first.
        assert_eq!(stacked.atom(0).unwrap().element, "Cu");
    }

    #[test]
    fn junction_preserves_the_bulk_interlayer_spacing() {
        let (slab, unit) = slab_and_bulk_unit();
        let separation = interlayer_separation(&unit.repeat((1, 1, 2))).unwrap();
        let stacked = append_bulk(&slab, &unit, Some(2), 10.0).unwrap();

        let n_bulk = 2 * unit.len();
        let bulk_top = (0..n_bulk)
            .filter_map(|i| stacked.position(i))
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max);
        let surface_bottom = (n_bulk..stacked.len())
            .filter_map(|i| stacked.position(i))
            .map(|p| p.z)
            .fold(f64::INFINITY, f64::min);
        assert!((surface_bottom - bulk_top - separation).abs() < 1e-6);
    }

    #[test]
    fn lateral_mismatch_is_rejected() {
        let (slab, _) = slab_and_bulk_unit();
        let other = cubic_bulk("Cu", LatticeKind::Fcc, 4.0).unwrap();
        assert!(matches!(
            append_bulk(&slab, &other, None, 10.0),
            Err(BuildError::IncompatibleCells { .. })
        ));
    }

    #[test]
    fn vacuum_is_split_evenly() {
        let (slab, unit) = slab_and_bulk_unit();
        let stacked = append_bulk(&slab, &unit, Some(1), 8.0).unwrap();
        let z_min = stacked.min_z().unwrap();
        let z_max = stacked.max_z().unwrap();
        let c = stacked.cell().vector(2).z;
        assert!((z_min - 4.0).abs() < 1e-6);
        assert!((c - z_max - 4.0).abs() < 1e-6);
    }
}
