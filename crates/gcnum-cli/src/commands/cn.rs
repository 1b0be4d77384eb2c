use crate::cli::CnArgs;
use crate::error::Result;
use crate::utils::parser::{parse_facet, parse_lattice, parse_site_indices};
use gcnum::analysis::coordination::coordination_numbers;
use gcnum::analysis::error::AnalysisError;
use gcnum::core::build::ConventionalCellBuilder;
use gcnum::core::build::traits::SlabBuilder;
use gcnum::core::models::lattice::LatticeKind;
use gcnum::core::models::structure::AtomicStructure;
use tracing::info;

pub fn run(args: CnArgs) -> Result<()> {
    let lattice = parse_lattice(&args.lattice)?;
    let structure = build_structure(&args, lattice)?;

    let sites: Vec<usize> = match &args.sites {
        Some(s) => parse_site_indices(s)?,
        None => (0..structure.len()).collect(),
    };
    let result = coordination_numbers(&structure, lattice, args.lattice_parameter, &sites)?;

    println!(
        "Coordination numbers for {} {} (a = {} A, bond = {} A):",
        args.element,
        lattice,
        args.lattice_parameter,
        lattice.reference_bond(args.lattice_parameter)
    );
    println!("{:>6}  {:>4}  {:>10}  {:>3}", "atom", "elem", "z [A]", "CN");
    for site in &result.sites {
        if let Some(atom) = structure.atom(site.site) {
            println!(
                "{:>6}  {:>4}  {:>10.4}  {:>3}",
                site.site,
                atom.element,
                atom.position.z,
                site.coordination()
            );
            if args.sites.is_some() {
                println!("        neighbors: {:?}", site.neighbors);
            }
        }
    }

    Ok(())
}

/// Builds the model to analyze: a bulk conventional cell, or a slab when a
/// facet is requested.
fn build_structure(args: &CnArgs, lattice: LatticeKind) -> Result<AtomicStructure> {
    let builder = ConventionalCellBuilder;
    let bulk = builder
        .build_bulk(&args.element, lattice, args.lattice_parameter)
        .map_err(AnalysisError::from)?;

    match &args.facet {
        Some(s) => {
            let facet = parse_facet(s)?;
            info!(?facet, layers = args.layers, "Building a slab model.");
            Ok(builder
                .cut_surface(&bulk, facet, args.layers, args.vacuum)
                .map_err(AnalysisError::from)?)
        }
        None => {
            info!("Building a bulk conventional cell.");
            Ok(bulk)
        }
    }
}
