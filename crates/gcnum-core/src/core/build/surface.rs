use super::error::BuildError;
use crate::core::models::atom::Atom;
use crate::core::models::cell::Cell;
use crate::core::models::structure::AtomicStructure;
use nalgebra::{Point3, Vector3};

const TOL: f64 = 1e-10;

/// Cuts a vacuum-padded slab exposing the facet (h, k, l) from a bulk cell.
///
/// The cut follows the standard unimodular-basis construction: a new set of
/// lattice vectors is chosen, by extended-gcd arithmetic on the Miller
/// indices, such that the first two vectors span the cutting plane and the
/// third stacks it. Being unimodular, the transformation preserves the atom
/// density of the bulk cell. The slab is then repeated `layers` times along
/// the stacking vector, rotated into standard orientation (first lattice
/// vector along x, surface normal along z), wrapped laterally, and padded
/// with `vacuum` Angstroms of empty space on each side.
pub fn cut_surface(
    bulk: &AtomicStructure,
    facet: (i32, i32, i32),
    layers: usize,
    vacuum: f64,
) -> Result<AtomicStructure, BuildError> {
    if facet == (0, 0, 0) {
        return Err(BuildError::InvalidFacet);
    }
    if layers == 0 {
        return Err(BuildError::NoLayers);
    }
    if bulk.is_empty() {
        return Err(BuildError::EmptyStructure);
    }

    let basis = surface_basis(bulk.cell(), facet.0 as i64, facet.1 as i64, facet.2 as i64);

    // Lattice vectors of the re-based cell: integer combinations of the old.
    let row = |c: &[i64; 3]| {
        bulk.cell().vector(0) * c[0] as f64
            + bulk.cell().vector(1) * c[1] as f64
            + bulk.cell().vector(2) * c[2] as f64
    };
    let rebased = Cell::new([row(&basis[0]), row(&basis[1]), row(&basis[2])], [true; 3]);

    // Re-express the bulk atoms in the new basis and wrap them into the cell.
    let mut atoms = Vec::with_capacity(bulk.len());
    for atom in bulk.atoms() {
        let f = rebased
            .fractional(&atom.position.coords)
            .ok_or(BuildError::DegenerateCell)?;
        let wrapped = Vector3::new(
            f.x - (f.x + TOL).floor(),
            f.y - (f.y + TOL).floor(),
            f.z - (f.z + TOL).floor(),
        );
        atoms.push(Atom::new(
            &atom.element,
            Point3::from(rebased.cartesian(&wrapped)),
        ));
    }

    let mut slab = AtomicStructure::new(atoms, rebased).repeat((1, 1, layers));

    // Replace the stacking vector by its projection onto the surface normal;
    // atoms keep their Cartesian positions.
    let a1 = slab.cell().vector(0);
    let a2 = slab.cell().vector(1);
    let a3 = slab.cell().vector(2);
    let normal = a1.cross(&a2);
    if normal.norm_squared() < TOL {
        return Err(BuildError::DegenerateCell);
    }
    let a3_projected = normal * (a3.dot(&normal) / normal.norm_squared());
    slab.cell_mut().set_vector(2, a3_projected);

    // Rotate into standard orientation: a1 along x, the normal along z.
    // The target cell has the same Gram matrix, so this is a rigid motion.
    let source = slab.cell().clone();
    let len1 = a1.norm();
    let proj = a1.dot(&a2) / len1;
    let ortho = (a2.norm_squared() - proj * proj).max(0.0).sqrt();
    let target = Cell::new(
        [
            Vector3::new(len1, 0.0, 0.0),
            Vector3::new(proj, ortho, 0.0),
            Vector3::new(0.0, 0.0, a3_projected.norm()),
        ],
        [true; 3],
    );
    for atom in slab.atoms_iter_mut() {
        let f = source
            .fractional(&atom.position.coords)
            .ok_or(BuildError::DegenerateCell)?;
        atom.position = Point3::from(target.cartesian(&f));
    }
    *slab.cell_mut() = target;

    // Wrap laterally; z is handled by the vacuum padding below.
    let lateral = slab.cell().clone();
    for atom in slab.atoms_iter_mut() {
        let f = lateral
            .fractional(&atom.position.coords)
            .ok_or(BuildError::DegenerateCell)?;
        let wrapped = Vector3::new(f.x.rem_euclid(1.0), f.y.rem_euclid(1.0), f.z);
        atom.position = Point3::from(lateral.cartesian(&wrapped));
    }

    // Vacuum padding on both sides of the slab.
    let z_min = slab.min_z().ok_or(BuildError::EmptyStructure)?;
    let z_max = slab.max_z().ok_or(BuildError::EmptyStructure)?;
    slab.cell_mut()
        .set_vector(2, Vector3::new(0.0, 0.0, z_max - z_min + 2.0 * vacuum));
    slab.cell_mut().set_periodic([true, true, false]);
    slab.translate(Vector3::new(0.0, 0.0, vacuum - z_min));

    Ok(slab)
}

/// Chooses a unimodular basis whose first two vectors span the (h, k, l)
/// plane of the given cell and whose third vector stacks it.
fn surface_basis(cell: &Cell, h: i64, k: i64, l: i64) -> [[i64; 3]; 3] {
    let (h0, k0, l0) = (h == 0, k == 0, l == 0);

    // With two zero indices the cut is along a cell plane; a permutation of
    // the lattice vectors suffices.
    if (h0 && k0) || (h0 && l0) || (k0 && l0) {
        if !h0 {
            return [[0, 1, 0], [0, 0, 1], [1, 0, 0]];
        }
        if !k0 {
            return [[0, 0, 1], [1, 0, 0], [0, 1, 0]];
        }
        return [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
    }

    let (mut p, mut q) = ext_gcd(k, l);
    let a1 = cell.vector(0);
    let a2 = cell.vector(1);
    let a3 = cell.vector(2);
    let (hf, kf, lf) = (h as f64, k as f64, l as f64);

    // Minimize the in-plane skew of the first basis vector.
    let u = a1 * kf - a2 * hf;
    let v = a1 * lf - a3 * hf;
    let w = a2 * lf - a3 * kf;
    let k1 = (u * p as f64 + v * q as f64).dot(&w);
    let k2 = (u * lf - v * kf).dot(&w);
    if k2.abs() > TOL {
        let i = -(k1 / k2).round() as i64;
        p += i * l;
        q -= i * k;
    }

    let (a, b) = ext_gcd(p * k + q * l, h);
    let g = gcd(l, k).abs().max(1);
    [
        [p * k + q * l, -p * h, -q * h],
        [0, l / g, -k / g],
        [b, a * p, a * q],
    ]
}

/// Extended Euclid: returns (x, y) with a*x + b*y = gcd(a, b).
fn ext_gcd(a: i64, b: i64) -> (i64, i64) {
    if b == 0 {
        (1, 0)
    } else {
        let (x, y) = ext_gcd(b, a.rem_euclid(b));
        (y, x - y * a.div_euclid(b))
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let r = a.rem_euclid(b);
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build::bulk::cubic_bulk;
    use crate::core::models::lattice::LatticeKind;

    const Z_TOL: f64 = 1e-6;

    fn distinct_z_levels(slab: &AtomicStructure) -> Vec<f64> {
        let mut zs: Vec<f64> = slab.atoms().iter().map(|a| a.position.z).collect();
        zs.sort_by(|a, b| a.total_cmp(b));
        let mut levels: Vec<f64> = Vec::new();
        for z in zs {
            if levels.last().is_none_or(|last| (z - last).abs() > Z_TOL) {
                levels.push(z);
            }
        }
        levels
    }

    #[test]
    fn ext_gcd_satisfies_bezout() {
        for (a, b) in [(3, 5), (12, 18), (-4, 6), (7, 0), (1, 1), (2, -3)] {
            let (x, y) = ext_gcd(a, b);
            assert_eq!(a * x + b * y, gcd(a, b), "a={a} b={b}");
        }
    }

    #[test]
    fn fcc_111_slab_preserves_atom_density() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        let slab = cut_surface(&bulk, (1, 1, 1), 6, 10.0).unwrap();
        // The unimodular basis keeps 4 atoms per stacked layer.
        assert_eq!(slab.len(), 24);
        assert_eq!(slab.cell().periodic(), [true, true, false]);
    }

    #[test]
    fn fcc_111_layer_spacing_is_a_over_sqrt3() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        let slab = cut_surface(&bulk, (1, 1, 1), 6, 10.0).unwrap();
        let levels = distinct_z_levels(&slab);
        assert_eq!(levels.len(), 6);
        let expected = 3.6 / 3.0f64.sqrt();
        for pair in levels.windows(2) {
            assert!((pair[1] - pair[0] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn fcc_100_slab_uses_the_cell_plane_directly() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        let slab = cut_surface(&bulk, (1, 0, 0), 4, 10.0).unwrap();
        assert_eq!(slab.len(), 16);
        let levels = distinct_z_levels(&slab);
        // Each cubic cell contributes two (100) sublayers spaced a/2.
        assert_eq!(levels.len(), 8);
        assert!((levels[1] - levels[0] - 1.8).abs() < 1e-6);
    }

    #[test]
    fn vacuum_pads_both_sides_of_the_slab() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        let slab = cut_surface(&bulk, (1, 1, 1), 4, 12.0).unwrap();
        let z_min = slab.min_z().unwrap();
        let z_max = slab.max_z().unwrap();
        let c = slab.cell().vector(2).z;
        assert!((z_min - 12.0).abs() < 1e-6);
        assert!((c - z_max - 12.0).abs() < 1e-6);
    }

    #[test]
    fn zero_facet_is_rejected() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        assert!(matches!(
            cut_surface(&bulk, (0, 0, 0), 4, 10.0),
            Err(BuildError::InvalidFacet)
        ));
    }

    #[test]
    fn zero_layers_are_rejected() {
        let bulk = cubic_bulk("Cu", LatticeKind::Fcc, 3.6).unwrap();
        assert!(matches!(
            cut_surface(&bulk, (1, 1, 1), 0, 10.0),
            Err(BuildError::NoLayers)
        ));
    }
}
