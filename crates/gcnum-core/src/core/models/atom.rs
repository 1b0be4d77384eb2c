use nalgebra::Point3;

/// Represents a single atom in an atomic structure.
///
/// An atom carries its chemical identity and Cartesian position. It holds no
/// reference to the structure it belongs to; membership and neighbor
/// relations are expressed through indices into the owning
/// [`AtomicStructure`](super::structure::AtomicStructure).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "Cu", "Fe").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    ///
    /// # Arguments
    ///
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom in Angstroms.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_stores_element_and_position() {
        let atom = Atom::new("Cu", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, "Cu");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }
}
