use super::config::GcnConfig;
use super::progress::{Progress, ProgressReporter};
use crate::analysis::error::AnalysisError;
use crate::analysis::gcn::{GcnBreakdown, generalized_coordination_number};
use crate::analysis::sites::{
    SiteKind, atom_at, bridge_partner, corner_anchor, interior_bulk_site, top_layer,
};
use crate::core::build::ConventionalCellBuilder;
use crate::core::build::traits::SlabBuilder;
use tracing::{info, instrument};

/// The outcome of a GCN workflow run.
#[derive(Debug, Clone, PartialEq)]
pub struct GcnReport {
    /// The generalized coordination number of the surface site.
    pub gcn: f64,
    /// Size of the bulk-equivalent site's first shell.
    pub cn_max: usize,
    /// Atom indices forming the surface site, in the final slab.
    pub site_indices: Vec<usize>,
    /// First-nearest-neighbor set of the site, ordered by atom index.
    pub first_shell: Vec<usize>,
    /// Coordination number of each first-shell atom.
    pub shell_coordinations: Vec<usize>,
}

/// Runs the complete GCN calculation with the built-in cubic-cell builder.
pub fn run(config: &GcnConfig, reporter: &ProgressReporter) -> Result<GcnReport, AnalysisError> {
    run_with_builder(&ConventionalCellBuilder, config, reporter)
}

/// Runs the complete GCN calculation: build a slab, identify the surface
/// and bulk-reference sites, replicate laterally, and evaluate the GCN.
///
/// Sites are identified on the single-cell slab and relocated into the
/// replicated slab by their coordinates. The anchor moves to a central
/// replica so its neighbor shell never touches the slab boundary; a bridge
/// partner is relocated through the minimum-image displacement from the
/// anchor, since the partner found under periodic boundary conditions may
/// be a wrapped image of the atom at bond distance.
#[instrument(skip_all, name = "gcn_workflow")]
pub fn run_with_builder(
    builder: &impl SlabBuilder,
    config: &GcnConfig,
    reporter: &ProgressReporter,
) -> Result<GcnReport, AnalysisError> {
    let (h, k, l) = config.facet;
    let (nx, ny) = config.repetitions;

    reporter.report(Progress::PhaseStart {
        name: "Slab construction",
    });
    info!(
        element = %config.element,
        lattice = %config.lattice,
        facet = ?config.facet,
        layers = config.layers,
        "Building the slab model."
    );
    let bulk = builder.build_bulk(&config.element, config.lattice, config.lattice_parameter)?;
    let slab = builder.cut_surface(&bulk, (h, k, l), config.layers, config.vacuum)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Site identification",
    });
    let top = top_layer(&slab)?;
    let anchor = corner_anchor(&slab, &top)?;
    info!(site = %config.site, anchor, "Identified the surface site.");

    let replicated = slab.repeat((nx, ny, 1));
    let shift = slab.cell().vector(0) * (nx / 2) as f64 + slab.cell().vector(1) * (ny / 2) as f64;
    let anchor_pos = slab
        .position(anchor)
        .ok_or(AnalysisError::SiteIndexOutOfBounds {
            index: anchor,
            atom_count: slab.len(),
        })?;
    let anchor_target = anchor_pos + shift;
    let relocated_anchor = atom_at(&replicated, &anchor_target)?;

    let site_indices = match config.site {
        SiteKind::Ontop => vec![relocated_anchor],
        SiteKind::Bridge => {
            let partner = bridge_partner(
                &slab,
                config.lattice,
                config.lattice_parameter,
                anchor,
                &top,
            )?;
            let partner_pos =
                slab.position(partner)
                    .ok_or(AnalysisError::SiteIndexOutOfBounds {
                        index: partner,
                        atom_count: slab.len(),
                    })?;
            let partner_target =
                anchor_target + slab.cell().minimum_image_displacement(&anchor_pos, &partner_pos);
            vec![relocated_anchor, atom_at(&replicated, &partner_target)?]
        }
    };

    let bulk_site = interior_bulk_site(
        &replicated,
        config.lattice,
        config.lattice_parameter,
        config.site,
    )?;
    reporter.report(Progress::Message(format!(
        "{} site at atom(s) {:?}, bulk reference at {:?}",
        config.site, site_indices, bulk_site
    )));
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Coordination analysis",
    });
    let GcnBreakdown {
        gcn,
        cn_max,
        first_shell,
        shell_coordinations,
    } = generalized_coordination_number(
        &replicated,
        config.lattice,
        config.lattice_parameter,
        &site_indices,
        &bulk_site,
    )?;
    info!(gcn, cn_max, shell = first_shell.len(), "GCN evaluated.");
    reporter.report(Progress::PhaseFinish);

    Ok(GcnReport {
        gcn,
        cn_max,
        site_indices,
        first_shell,
        shell_coordinations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::LatticeKind;
    use crate::workflows::config::GcnConfigBuilder;
    use std::sync::Mutex;

    const TOLERANCE: f64 = 1e-9;

    fn fcc_111_config(site: SiteKind) -> GcnConfig {
        GcnConfigBuilder::new()
            .lattice(LatticeKind::Fcc)
            .site(site)
            .layers(6)
            .vacuum(12.0)
            .build()
            .unwrap()
    }

    #[test]
    fn ontop_site_on_fcc_111_scores_seven_and_a_half() {
        let config = fcc_111_config(SiteKind::Ontop);
        let report = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.cn_max, 12);
        assert_eq!(report.first_shell.len(), 9);
        assert!((report.gcn - 7.5).abs() < TOLERANCE);
    }

    #[test]
    fn bridge_site_on_fcc_111_scores_seven_and_a_half() {
        let config = fcc_111_config(SiteKind::Bridge);
        let report = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.cn_max, 20);
        assert_eq!(report.site_indices.len(), 2);
        assert_eq!(report.first_shell.len(), 15);
        assert!((report.gcn - 7.5).abs() < TOLERANCE);
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let config = fcc_111_config(SiteKind::Ontop);
        let a = run(&config, &ProgressReporter::new()).unwrap();
        let b = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bcc_100_ontop_site_loses_half_its_shell() {
        let config = GcnConfigBuilder::new()
            .lattice(LatticeKind::Bcc)
            .site(SiteKind::Ontop)
            .element("Fe")
            .lattice_parameter(2.87)
            .facet((1, 0, 0))
            .layers(8)
            .vacuum(12.0)
            .build()
            .unwrap();
        let report = run(&config, &ProgressReporter::new()).unwrap();
        // A bcc(100) surface atom keeps the 4 first neighbors below it,
        // each of which is fully coordinated: 4 * 8 / 8.
        assert_eq!(report.cn_max, 8);
        assert_eq!(report.first_shell.len(), 4);
        assert!((report.gcn - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn progress_phases_are_reported_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|p| {
            events.lock().unwrap().push(p);
        }));
        let config = fcc_111_config(SiteKind::Ontop);
        run(&config, &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Progress::PhaseStart { name } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "Slab construction",
                "Site identification",
                "Coordination analysis"
            ]
        );
        let finishes = events
            .iter()
            .filter(|e| matches!(e, Progress::PhaseFinish))
            .count();
        assert_eq!(finishes, 3);

        // Site identification announces the chosen atoms.
        assert!(
            events
                .iter()
                .any(|e| matches!(e, Progress::Message(m) if m.contains("ontop site at atom")))
        );
    }
}
