use crate::cli::GcnArgs;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use crate::utils::parser::{parse_facet, parse_lattice, parse_repetitions, parse_site};
use gcnum::workflows::config::{GcnConfig, GcnConfigBuilder};
use gcnum::workflows::gcn;
use gcnum::workflows::progress::ProgressReporter;
use tracing::info;

pub fn run(args: GcnArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    info!(
        "Resolved configuration: {} {} site on {}({},{},{}).",
        config.lattice, config.site, config.element, config.facet.0, config.facet.1, config.facet.2
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting GCN calculation...");
    info!("Invoking the core GCN workflow...");
    let report = gcn::run(&config, &reporter)?;

    println!(
        "✓ GCN of the {} site on {} {}({},{},{}): {:.4}",
        config.site,
        config.element,
        config.lattice,
        config.facet.0,
        config.facet.1,
        config.facet.2,
        report.gcn
    );
    println!(
        "  First shell: {} atoms (cn_max = {})",
        report.first_shell.len(),
        report.cn_max
    );
    for (atom, cn) in report.first_shell.iter().zip(&report.shell_coordinations) {
        println!("    atom {:>6}  CN = {}", atom, cn);
    }

    Ok(())
}

/// Merges the optional TOML configuration file with command-line overrides.
fn resolve_config(args: &GcnArgs) -> Result<GcnConfig> {
    let mut builder = GcnConfigBuilder::new();

    if let Some(path) = &args.config {
        info!("Loading configuration from {:?}.", path);
        let file = GcnConfig::from_toml_file(path)?;
        builder = builder
            .lattice(file.lattice)
            .site(file.site)
            .element(file.element)
            .lattice_parameter(file.lattice_parameter)
            .facet(file.facet)
            .layers(file.layers)
            .vacuum(file.vacuum)
            .repetitions(file.repetitions);
    }

    if let Some(s) = &args.lattice {
        builder = builder.lattice(parse_lattice(s)?);
    }
    if let Some(s) = &args.site {
        builder = builder.site(parse_site(s)?);
    }
    if let Some(element) = &args.element {
        builder = builder.element(element.clone());
    }
    if let Some(a) = args.lattice_parameter {
        builder = builder.lattice_parameter(a);
    }
    if let Some(s) = &args.facet {
        builder = builder.facet(parse_facet(s)?);
    }
    if let Some(layers) = args.layers {
        builder = builder.layers(layers);
    }
    if let Some(vacuum) = args.vacuum {
        builder = builder.vacuum(vacuum);
    }
    if let Some(s) = &args.repetitions {
        builder = builder.repetitions(parse_repetitions(s)?);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcnum::analysis::sites::SiteKind;
    use gcnum::core::models::lattice::LatticeKind;
    use std::io::Write;

    fn base_args() -> GcnArgs {
        GcnArgs {
            config: None,
            lattice: None,
            site: None,
            element: None,
            lattice_parameter: None,
            facet: None,
            layers: None,
            vacuum: None,
            repetitions: None,
        }
    }

    #[test]
    fn flags_alone_resolve_a_config() {
        let mut args = base_args();
        args.lattice = Some("fcc".to_string());
        args.site = Some("ontop".to_string());
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.lattice, LatticeKind::Fcc);
        assert_eq!(config.site, SiteKind::Ontop);
        assert_eq!(config.element, "Cu");
    }

    #[test]
    fn missing_lattice_and_site_is_an_error() {
        assert!(resolve_config(&base_args()).is_err());
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "lattice = \"fcc\"\nsite = \"ontop\"\nelement = \"Cu\"\nlayers = 10"
        )
        .unwrap();

        let mut args = base_args();
        args.config = Some(file.path().to_path_buf());
        args.site = Some("bridge".to_string());
        args.element = Some("Au".to_string());

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.site, SiteKind::Bridge);
        assert_eq!(config.element, "Au");
        // Values the flags leave alone come from the file.
        assert_eq!(config.layers, 10);
    }
}
