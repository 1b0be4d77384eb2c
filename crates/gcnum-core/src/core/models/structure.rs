use super::atom::Atom;
use super::cell::Cell;
use nalgebra::{Point3, Vector3};

/// Represents an ordered, periodic atomic structure.
///
/// This is the central data structure of the crate: an ordered sequence of
/// atoms in a periodic cell. Atoms are addressed by their index in the
/// sequence, and every operation preserves the existing order; replication
/// appends copies after the original block, so indices established before a
/// `repeat` remain valid afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicStructure {
    atoms: Vec<Atom>,
    cell: Cell,
}

impl AtomicStructure {
    /// Creates a structure from an ordered atom list and a cell.
    pub fn new(atoms: Vec<Atom>, cell: Cell) -> Self {
        Self { atoms, cell }
    }

    /// Returns the number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the structure contains no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Retrieves an atom by index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns the full ordered atom slice.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the periodic cell.
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    /// Returns a mutable reference to the periodic cell.
    ///
    /// Changing the cell does not move atoms; callers adjusting lattice
    /// vectors (e.g. when adding vacuum) shift positions themselves.
    pub fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    /// Retrieves the position of an atom by index.
    pub fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.atoms.get(index).map(|a| a.position)
    }

    /// Computes the distance between atoms `i` and `j` in Angstroms.
    ///
    /// # Arguments
    ///
    /// * `i`, `j` - Atom indices.
    /// * `mic` - Apply the minimum-image convention along periodic axes.
    ///
    /// # Return
    ///
    /// Returns `None` if either index is out of range.
    pub fn distance(&self, i: usize, j: usize, mic: bool) -> Option<f64> {
        let a = self.position(i)?;
        let b = self.position(j)?;
        if mic {
            Some(self.cell.minimum_image_distance(&a, &b))
        } else {
            Some((b - a).norm())
        }
    }

    /// Returns a mutable iterator over all atoms, in index order.
    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.atoms.iter_mut()
    }

    /// Translates every atom by `shift`.
    pub fn translate(&mut self, shift: Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += shift;
        }
    }

    /// Returns the minimum z coordinate, or `None` for an empty structure.
    pub fn min_z(&self) -> Option<f64> {
        self.atoms
            .iter()
            .map(|a| a.position.z)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Returns the maximum z coordinate, or `None` for an empty structure.
    pub fn max_z(&self) -> Option<f64> {
        self.atoms
            .iter()
            .map(|a| a.position.z)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Replicates the structure along its lattice vectors.
    ///
    /// Copies are emitted copy-major: the block for replica (i0, i1, i2)
    /// holds the original atoms in order, shifted by the corresponding
    /// lattice translation, with replicas iterated i0-outermost. The
    /// (0, 0, 0) block comes first, so original indices stay valid.
    ///
    /// # Arguments
    ///
    /// * `factors` - Replication counts along the three lattice vectors.
    pub fn repeat(&self, factors: (usize, usize, usize)) -> AtomicStructure {
        let (n0, n1, n2) = factors;
        let (a0, a1, a2) = (self.cell.vector(0), self.cell.vector(1), self.cell.vector(2));

        let mut atoms = Vec::with_capacity(self.atoms.len() * n0 * n1 * n2);
        for i0 in 0..n0 {
            for i1 in 0..n1 {
                for i2 in 0..n2 {
                    let shift = a0 * i0 as f64 + a1 * i1 as f64 + a2 * i2 as f64;
                    for atom in &self.atoms {
                        atoms.push(Atom {
                            element: atom.element.clone(),
                            position: atom.position + shift,
                        });
                    }
                }
            }
        }

        let cell = Cell::new(
            [a0 * n0 as f64, a1 * n1 as f64, a2 * n2 as f64],
            self.cell.periodic(),
        );
        AtomicStructure::new(atoms, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn two_atom_chain() -> AtomicStructure {
        let cell = Cell::cubic(4.0);
        AtomicStructure::new(
            vec![
                Atom::new("Cu", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("Cu", Point3::new(3.5, 0.0, 0.0)),
            ],
            cell,
        )
    }

    #[test]
    fn distance_without_mic_is_direct() {
        let s = two_atom_chain();
        assert!((s.distance(0, 1, false).unwrap() - 3.5).abs() < TOLERANCE);
    }

    #[test]
    fn distance_with_mic_wraps_to_nearest_image() {
        let s = two_atom_chain();
        assert!((s.distance(0, 1, true).unwrap() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn distance_with_out_of_range_index_is_none() {
        let s = two_atom_chain();
        assert!(s.distance(0, 7, true).is_none());
    }

    #[test]
    fn repeat_keeps_original_indices_first() {
        let s = two_atom_chain();
        let r = s.repeat((2, 1, 1));
        assert_eq!(r.len(), 4);
        for i in 0..s.len() {
            assert_eq!(r.position(i).unwrap(), s.position(i).unwrap());
        }
        // Second block is shifted by the first lattice vector.
        assert!((r.position(2).unwrap().x - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn repeat_scales_the_cell() {
        let s = two_atom_chain();
        let r = s.repeat((2, 3, 1));
        assert!((r.cell().vector(0).x - 8.0).abs() < TOLERANCE);
        assert!((r.cell().vector(1).y - 12.0).abs() < TOLERANCE);
        assert!((r.cell().vector(2).z - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn translate_shifts_every_atom() {
        let mut s = two_atom_chain();
        s.translate(Vector3::new(0.0, 0.0, 2.0));
        assert!((s.min_z().unwrap() - 2.0).abs() < TOLERANCE);
        assert!((s.max_z().unwrap() - 2.0).abs() < TOLERANCE);
    }
}
