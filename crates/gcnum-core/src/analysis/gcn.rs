use super::coordination::coordination_numbers;
use super::error::AnalysisError;
use crate::core::models::lattice::LatticeKind;
use crate::core::models::structure::AtomicStructure;

/// The full decomposition of a generalized coordination number.
///
/// GCN = sum of the coordination numbers of the site's first-shell atoms,
/// divided by `cn_max`, the size of the first shell a geometrically
/// equivalent site has deep in the bulk. The decomposition is kept so
/// callers can report which atoms contributed and how bulk-like each of
/// them is.
#[derive(Debug, Clone, PartialEq)]
pub struct GcnBreakdown {
    /// The generalized coordination number.
    pub gcn: f64,
    /// Size of the bulk-equivalent site's first shell.
    pub cn_max: usize,
    /// First-nearest-neighbor set of the site, ordered by atom index.
    pub first_shell: Vec<usize>,
    /// Coordination number of each first-shell atom, parallel to
    /// `first_shell`.
    pub shell_coordinations: Vec<usize>,
}

/// Computes the generalized coordination number of a surface site.
///
/// The site may span one atom (ontop) or several (bridge); its first shell
/// is the union of the member atoms' first-nearest-neighbor sets, which for
/// a multi-atom site includes the site atoms themselves since they neighbor
/// each other. The normalization constant is obtained the same way from
/// `bulk_site`, a site of identical local geometry placed where no surface
/// truncation occurs.
///
/// # Arguments
///
/// * `structure` - The slab model containing both sites.
/// * `lattice` - The crystal lattice kind.
/// * `lattice_parameter` - The conventional cubic cell edge in Angstroms.
/// * `surface_site` - Atom indices of the surface site.
/// * `bulk_site` - Atom indices of the bulk-equivalent site.
///
/// # Errors
///
/// Returns [`AnalysisError::NoNeighborsFound`] when either site has an
/// empty first shell; the division by `cn_max` is therefore never
/// degenerate. Out-of-range indices yield
/// [`AnalysisError::SiteIndexOutOfBounds`].
pub fn generalized_coordination_number(
    structure: &AtomicStructure,
    lattice: LatticeKind,
    lattice_parameter: f64,
    surface_site: &[usize],
    bulk_site: &[usize],
) -> Result<GcnBreakdown, AnalysisError> {
    let bulk_shell =
        coordination_numbers(structure, lattice, lattice_parameter, bulk_site)?.neighbor_union();
    let cn_max = bulk_shell.len();
    if cn_max == 0 {
        return Err(AnalysisError::NoNeighborsFound {
            site: bulk_site.to_vec(),
        });
    }

    let site_shell = coordination_numbers(structure, lattice, lattice_parameter, surface_site)?
        .neighbor_union();
    if site_shell.is_empty() {
        return Err(AnalysisError::NoNeighborsFound {
            site: surface_site.to_vec(),
        });
    }
    let first_shell: Vec<usize> = site_shell.into_iter().collect();

    let shell_result =
        coordination_numbers(structure, lattice, lattice_parameter, &first_shell)?;
    let shell_coordinations: Vec<usize> = shell_result
        .sites
        .iter()
        .map(|s| s.coordination())
        .collect();

    let total: usize = shell_coordinations.iter().sum();
    Ok(GcnBreakdown {
        gcn: total as f64 / cn_max as f64,
        cn_max,
        first_shell,
        shell_coordinations,
    })
}
