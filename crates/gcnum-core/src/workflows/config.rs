use crate::analysis::sites::SiteKind;
use crate::core::models::lattice::LatticeKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("Failed to read config file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

const DEFAULT_ELEMENT: &str = "Cu";
const DEFAULT_LATTICE_PARAMETER: f64 = 3.6;
const DEFAULT_FACET: (i32, i32, i32) = (1, 1, 1);
const DEFAULT_LAYERS: usize = 20;
const DEFAULT_VACUUM: f64 = 20.0;
const DEFAULT_REPETITIONS: (usize, usize) = (4, 4);

fn default_element() -> String {
    DEFAULT_ELEMENT.to_string()
}
fn default_lattice_parameter() -> f64 {
    DEFAULT_LATTICE_PARAMETER
}
fn default_facet() -> (i32, i32, i32) {
    DEFAULT_FACET
}
fn default_layers() -> usize {
    DEFAULT_LAYERS
}
fn default_vacuum() -> f64 {
    DEFAULT_VACUUM
}
fn default_repetitions() -> (usize, usize) {
    DEFAULT_REPETITIONS
}

/// Parameters of a generalized coordination number calculation.
///
/// The lattice and site kind carry no sensible default and must always be
/// given; every other parameter falls back to a conventional slab setup
/// (a 20-layer Cu slab with 20 Angstroms of vacuum, replicated 4x4).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GcnConfig {
    pub lattice: LatticeKind,
    pub site: SiteKind,

    #[serde(default = "default_element")]
    pub element: String,
    #[serde(default = "default_lattice_parameter")]
    pub lattice_parameter: f64,
    #[serde(default = "default_facet")]
    pub facet: (i32, i32, i32),
    #[serde(default = "default_layers")]
    pub layers: usize,
    #[serde(default = "default_vacuum")]
    pub vacuum: f64,
    #[serde(default = "default_repetitions")]
    pub repetitions: (usize, usize),
}

impl GcnConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (nx, ny) = self.repetitions;
        if nx == 0 || ny == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "repetitions",
                reason: format!("replication counts must be non-zero, got ({nx}, {ny})"),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct GcnConfigBuilder {
    lattice: Option<LatticeKind>,
    site: Option<SiteKind>,
    element: Option<String>,
    lattice_parameter: Option<f64>,
    facet: Option<(i32, i32, i32)>,
    layers: Option<usize>,
    vacuum: Option<f64>,
    repetitions: Option<(usize, usize)>,
}

impl GcnConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lattice(mut self, lattice: LatticeKind) -> Self {
        self.lattice = Some(lattice);
        self
    }
    pub fn site(mut self, site: SiteKind) -> Self {
        self.site = Some(site);
        self
    }
    pub fn element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
    pub fn lattice_parameter(mut self, a: f64) -> Self {
        self.lattice_parameter = Some(a);
        self
    }
    pub fn facet(mut self, facet: (i32, i32, i32)) -> Self {
        self.facet = Some(facet);
        self
    }
    pub fn layers(mut self, layers: usize) -> Self {
        self.layers = Some(layers);
        self
    }
    pub fn vacuum(mut self, vacuum: f64) -> Self {
        self.vacuum = Some(vacuum);
        self
    }
    pub fn repetitions(mut self, repetitions: (usize, usize)) -> Self {
        self.repetitions = Some(repetitions);
        self
    }

    pub fn build(self) -> Result<GcnConfig, ConfigError> {
        let config = GcnConfig {
            lattice: self
                .lattice
                .ok_or(ConfigError::MissingParameter("lattice"))?,
            site: self.site.ok_or(ConfigError::MissingParameter("site"))?,
            element: self.element.unwrap_or_else(default_element),
            lattice_parameter: self.lattice_parameter.unwrap_or(DEFAULT_LATTICE_PARAMETER),
            facet: self.facet.unwrap_or(DEFAULT_FACET),
            layers: self.layers.unwrap_or(DEFAULT_LAYERS),
            vacuum: self.vacuum.unwrap_or(DEFAULT_VACUUM),
            repetitions: self.repetitions.unwrap_or(DEFAULT_REPETITIONS),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builder_fills_in_conventional_defaults() {
        let config = GcnConfigBuilder::new()
            .lattice(LatticeKind::Fcc)
            .site(SiteKind::Ontop)
            .build()
            .unwrap();
        assert_eq!(config.element, "Cu");
        assert_eq!(config.facet, (1, 1, 1));
        assert_eq!(config.layers, 20);
        assert_eq!(config.repetitions, (4, 4));
        assert!((config.lattice_parameter - 3.6).abs() < 1e-12);
    }

    #[test]
    fn builder_without_lattice_reports_the_missing_parameter() {
        let result = GcnConfigBuilder::new().site(SiteKind::Bridge).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("lattice"))
        ));
    }

    #[test]
    fn zero_repetitions_are_rejected_by_the_builder() {
        let result = GcnConfigBuilder::new()
            .lattice(LatticeKind::Fcc)
            .site(SiteKind::Ontop)
            .repetitions((0, 4))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "repetitions",
                ..
            })
        ));
    }

    #[test]
    fn zero_repetitions_are_rejected_in_a_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "lattice = \"fcc\"\nsite = \"ontop\"\nrepetitions = [0, 0]"
        )
        .unwrap();
        assert!(matches!(
            GcnConfig::from_toml_file(file.path()),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn builder_overrides_take_precedence() {
        let config = GcnConfigBuilder::new()
            .lattice(LatticeKind::Bcc)
            .site(SiteKind::Bridge)
            .element("Fe")
            .lattice_parameter(2.87)
            .facet((1, 0, 0))
            .layers(8)
            .vacuum(12.0)
            .repetitions((3, 3))
            .build()
            .unwrap();
        assert_eq!(config.lattice, LatticeKind::Bcc);
        assert_eq!(config.element, "Fe");
        assert_eq!(config.facet, (1, 0, 0));
    }

    #[test]
    fn toml_file_round_trips_through_serde() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
lattice = "fcc"
site = "bridge"
element = "Au"
lattice-parameter = 4.08
layers = 12
repetitions = [6, 6]
"#
        )
        .unwrap();

        let config = GcnConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.lattice, LatticeKind::Fcc);
        assert_eq!(config.site, SiteKind::Bridge);
        assert_eq!(config.element, "Au");
        assert_eq!(config.repetitions, (6, 6));
        // Unset keys fall back to the defaults.
        assert_eq!(config.facet, (1, 1, 1));
        assert!((config.vacuum - 20.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lattice = \"fcc\"\nsite = \"ontop\"\nfoo = 1").unwrap();
        assert!(matches!(
            GcnConfig::from_toml_file(file.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let path = Path::new("/nonexistent/gcn.toml");
        assert!(matches!(
            GcnConfig::from_toml_file(path),
            Err(ConfigError::Io { .. })
        ));
    }
}
