use nalgebra::{Matrix3, Point3, Vector3};

/// Represents the periodic cell of an atomic structure.
///
/// The cell is described by three lattice vectors, stored as the rows of a
/// 3x3 matrix, together with a periodicity flag per axis. Slab models are
/// periodic in the two lateral directions only; bulk models are periodic in
/// all three.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Lattice vector matrix; row i is the i-th lattice vector in Angstroms.
    matrix: Matrix3<f64>,
    /// Periodicity flag per lattice vector.
    periodic: [bool; 3],
}

impl Cell {
    /// Creates a cell from three lattice vectors and periodicity flags.
    ///
    /// # Arguments
    ///
    /// * `vectors` - The three lattice vectors.
    /// * `periodic` - Whether the structure repeats along each vector.
    pub fn new(vectors: [Vector3<f64>; 3], periodic: [bool; 3]) -> Self {
        Self {
            matrix: Matrix3::from_rows(&[
                vectors[0].transpose(),
                vectors[1].transpose(),
                vectors[2].transpose(),
            ]),
            periodic,
        }
    }

    /// Creates a cubic cell with edge length `a`, periodic in all directions.
    pub fn cubic(a: f64) -> Self {
        Self::new(
            [
                Vector3::new(a, 0.0, 0.0),
                Vector3::new(0.0, a, 0.0),
                Vector3::new(0.0, 0.0, a),
            ],
            [true; 3],
        )
    }

    /// Returns the i-th lattice vector.
    ///
    /// # Panics
    ///
    /// Panics if `i >= 3`.
    pub fn vector(&self, i: usize) -> Vector3<f64> {
        self.matrix.row(i).transpose()
    }

    /// Returns the periodicity flags.
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Replaces the i-th lattice vector, keeping atoms' Cartesian positions
    /// the business of the caller.
    ///
    /// # Panics
    ///
    /// Panics if `i >= 3`.
    pub fn set_vector(&mut self, i: usize, v: Vector3<f64>) {
        self.matrix.set_row(i, &v.transpose());
    }

    /// Sets the periodicity flags.
    pub fn set_periodic(&mut self, periodic: [bool; 3]) {
        self.periodic = periodic;
    }

    /// Returns the cell volume in cubic Angstroms.
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Converts a Cartesian displacement into fractional coordinates.
    ///
    /// Returns `None` for a degenerate (zero-volume) cell.
    pub fn fractional(&self, cartesian: &Vector3<f64>) -> Option<Vector3<f64>> {
        self.matrix
            .transpose()
            .try_inverse()
            .map(|inv| inv * cartesian)
    }

    /// Converts fractional coordinates into a Cartesian displacement.
    pub fn cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transpose() * fractional
    }

    /// Returns the shortest displacement from `a` to `b` under the
    /// minimum-image convention.
    ///
    /// The displacement is first wrapped into the central cell along the
    /// periodic axes, then refined against the adjacent periodic images.
    /// The refinement makes the result exact for skewed cells, where naive
    /// per-axis wrapping alone can miss the nearest image.
    pub fn minimum_image_displacement(&self, a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64> {
        let raw = b - a;
        if self.periodic == [false; 3] {
            return raw;
        }
        let Some(mut frac) = self.fractional(&raw) else {
            return raw;
        };
        for axis in 0..3 {
            if self.periodic[axis] {
                frac[axis] -= frac[axis].round();
            }
        }
        let wrapped = self.cartesian(&frac);

        let mut best = wrapped;
        let mut best_sq = wrapped.norm_squared();
        let range = |p: bool| if p { -1..=1 } else { 0..=0 };
        for i in range(self.periodic[0]) {
            for j in range(self.periodic[1]) {
                for k in range(self.periodic[2]) {
                    let candidate = wrapped
                        + self.vector(0) * i as f64
                        + self.vector(1) * j as f64
                        + self.vector(2) * k as f64;
                    let sq = candidate.norm_squared();
                    if sq < best_sq {
                        best_sq = sq;
                        best = candidate;
                    }
                }
            }
        }
        best
    }

    /// Returns the minimum-image distance between two points in Angstroms.
    pub fn minimum_image_distance(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        self.minimum_image_displacement(a, b).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn cubic_cell_volume_is_edge_cubed() {
        let cell = Cell::cubic(3.6);
        assert!(f64_approx_equal(cell.volume(), 3.6 * 3.6 * 3.6));
    }

    #[test]
    fn fractional_roundtrips_through_cartesian() {
        let cell = Cell::new(
            [
                Vector3::new(2.0, 0.0, 0.0),
                Vector3::new(1.0, 2.0, 0.0),
                Vector3::new(0.0, 0.5, 3.0),
            ],
            [true; 3],
        );
        let v = Vector3::new(0.7, -1.3, 2.1);
        let frac = cell.fractional(&v).unwrap();
        let back = cell.cartesian(&frac);
        assert!((back - v).norm() < TOLERANCE);
    }

    #[test]
    fn minimum_image_distance_matches_direct_distance_for_interior_pair() {
        let cell = Cell::cubic(10.0);
        let a = Point3::new(4.0, 4.0, 4.0);
        let b = Point3::new(5.0, 5.0, 5.0);
        assert!(f64_approx_equal(
            cell.minimum_image_distance(&a, &b),
            3.0f64.sqrt()
        ));
    }

    #[test]
    fn minimum_image_distance_wraps_across_cell_boundary() {
        let cell = Cell::cubic(10.0);
        let a = Point3::new(0.5, 0.0, 0.0);
        let b = Point3::new(9.5, 0.0, 0.0);
        assert!(f64_approx_equal(cell.minimum_image_distance(&a, &b), 1.0));
    }

    #[test]
    fn aperiodic_axis_is_never_wrapped() {
        let mut cell = Cell::cubic(10.0);
        cell.set_periodic([true, true, false]);
        let a = Point3::new(0.0, 0.0, 0.5);
        let b = Point3::new(0.0, 0.0, 9.5);
        assert!(f64_approx_equal(cell.minimum_image_distance(&a, &b), 9.0));
    }

    #[test]
    fn skewed_cell_minimum_image_is_exact() {
        // A strongly skewed cell where per-axis wrapping alone is not enough.
        let cell = Cell::new(
            [
                Vector3::new(10.0, 0.0, 0.0),
                Vector3::new(9.0, 1.0, 0.0),
                Vector3::new(0.0, 0.0, 10.0),
            ],
            [true; 3],
        );
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(9.5, 0.5, 0.0);
        // Nearest image of b is at b - a1 - a2 + ... scan must find a vector
        // no longer than the naive wrap.
        let d = cell.minimum_image_distance(&a, &b);
        let naive = {
            let frac = cell.fractional(&(b - a)).unwrap();
            let wrapped = Vector3::new(
                frac[0] - frac[0].round(),
                frac[1] - frac[1].round(),
                frac[2] - frac[2].round(),
            );
            cell.cartesian(&wrapped).norm()
        };
        assert!(d <= naive + TOLERANCE);
    }
}
