use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a lattice type outside the supported set is requested.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported lattice type '{requested}' (supported: fcc, bcc)")]
pub struct UnsupportedLatticeError {
    /// The lattice name as requested by the caller.
    pub requested: String,
}

/// The crystal lattice types supported by the coordination analysis.
///
/// Only the two cubic close-packing families with a single-element basis are
/// supported; everything else is rejected at the parsing boundary with
/// [`UnsupportedLatticeError`] rather than silently producing a wrong bond
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    /// Face-centered cubic.
    Fcc,
    /// Body-centered cubic.
    Bcc,
}

impl LatticeKind {
    /// Returns the first-nearest-neighbor bond length for a given cubic
    /// lattice parameter, rounded to three decimals.
    ///
    /// fcc: a/sqrt(2); bcc: a*sqrt(3)/2. The rounding is part of the
    /// contract: the neighbor tolerance band (±0.001 A) is taken around
    /// this rounded value.
    ///
    /// # Arguments
    ///
    /// * `lattice_parameter` - The conventional cubic cell edge in Angstroms.
    pub fn reference_bond(&self, lattice_parameter: f64) -> f64 {
        let bond = match self {
            LatticeKind::Fcc => lattice_parameter / 2.0f64.sqrt(),
            LatticeKind::Bcc => lattice_parameter * 3.0f64.sqrt() / 2.0,
        };
        (bond * 1000.0).round() / 1000.0
    }

    /// Returns the first-shell coordination number of a bulk interior atom.
    pub fn bulk_coordination(&self) -> usize {
        match self {
            LatticeKind::Fcc => 12,
            LatticeKind::Bcc => 8,
        }
    }
}

impl FromStr for LatticeKind {
    type Err = UnsupportedLatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcc" => Ok(LatticeKind::Fcc),
            "bcc" => Ok(LatticeKind::Bcc),
            other => Err(UnsupportedLatticeError {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatticeKind::Fcc => write!(f, "fcc"),
            LatticeKind::Bcc => write!(f, "bcc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn fcc_reference_bond_is_rounded_a_over_sqrt2() {
        assert!(f64_approx_equal(
            LatticeKind::Fcc.reference_bond(3.6),
            2.546
        ));
    }

    #[test]
    fn bcc_reference_bond_is_rounded_a_sqrt3_over_2() {
        assert!(f64_approx_equal(
            LatticeKind::Bcc.reference_bond(3.6),
            3.118
        ));
    }

    #[test]
    fn bulk_coordination_is_12_for_fcc_and_8_for_bcc() {
        assert_eq!(LatticeKind::Fcc.bulk_coordination(), 12);
        assert_eq!(LatticeKind::Bcc.bulk_coordination(), 8);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("FCC".parse::<LatticeKind>().unwrap(), LatticeKind::Fcc);
        assert_eq!("bcc".parse::<LatticeKind>().unwrap(), LatticeKind::Bcc);
    }

    #[test]
    fn parsing_an_unsupported_lattice_fails_with_the_requested_name() {
        let err = "hcp".parse::<LatticeKind>().unwrap_err();
        assert_eq!(err.requested, "hcp");
    }
}
