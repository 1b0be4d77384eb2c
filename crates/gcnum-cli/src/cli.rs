use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The gcnum developers",
    version,
    about = "gcnum - Coordination-number and generalized-coordination-number analysis of crystal surfaces.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the generalized coordination number of an adsorption site.
    Gcn(GcnArgs),
    /// Tabulate first-shell coordination numbers for a bulk or slab model.
    Cn(CnArgs),
}

/// Arguments for the `gcn` subcommand.
#[derive(Args, Debug)]
pub struct GcnArgs {
    /// Path to a configuration file in TOML format. Command-line flags
    /// override values from the file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The crystal lattice type ('fcc' or 'bcc').
    #[arg(long, value_name = "KIND")]
    pub lattice: Option<String>,

    /// The adsorption-site geometry ('ontop' or 'bridge').
    #[arg(long, value_name = "KIND")]
    pub site: Option<String>,

    /// The element symbol for the slab atoms.
    #[arg(short, long, value_name = "SYMBOL")]
    pub element: Option<String>,

    /// The conventional cubic lattice parameter in Angstroms.
    #[arg(short = 'a', long, value_name = "FLOAT")]
    pub lattice_parameter: Option<f64>,

    /// The Miller indices of the exposed facet, e.g. '1,1,1'.
    #[arg(short, long, value_name = "H,K,L")]
    pub facet: Option<String>,

    /// The number of layers in the slab model.
    #[arg(short, long, value_name = "INT")]
    pub layers: Option<usize>,

    /// Vacuum padding in Angstroms on each side of the slab.
    #[arg(long, value_name = "FLOAT")]
    pub vacuum: Option<f64>,

    /// Lateral replication of the slab, e.g. '4,4'.
    #[arg(short, long, value_name = "NX,NY")]
    pub repetitions: Option<String>,
}

/// Arguments for the `cn` subcommand.
#[derive(Args, Debug)]
pub struct CnArgs {
    /// The crystal lattice type ('fcc' or 'bcc').
    #[arg(long, required = true, value_name = "KIND")]
    pub lattice: String,

    /// The element symbol for the atoms.
    #[arg(short, long, default_value = "Cu", value_name = "SYMBOL")]
    pub element: String,

    /// The conventional cubic lattice parameter in Angstroms.
    #[arg(short = 'a', long, default_value_t = 3.6, value_name = "FLOAT")]
    pub lattice_parameter: f64,

    /// Cut a slab exposing this facet instead of analyzing the bulk cell,
    /// e.g. '1,1,1'.
    #[arg(short, long, value_name = "H,K,L")]
    pub facet: Option<String>,

    /// The number of layers in the slab model.
    #[arg(short, long, default_value_t = 6, value_name = "INT")]
    pub layers: usize,

    /// Vacuum padding in Angstroms on each side of the slab.
    #[arg(long, default_value_t = 12.0, value_name = "FLOAT")]
    pub vacuum: f64,

    /// Restrict the analysis to these atom indices and print their full
    /// neighbor lists, e.g. '0,5,12'. All atoms when omitted.
    #[arg(short, long, value_name = "I,J,...")]
    pub sites: Option<String>,
}
