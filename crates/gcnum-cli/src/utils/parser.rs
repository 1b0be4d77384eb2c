use crate::error::{CliError, Result};
use gcnum::analysis::sites::SiteKind;
use gcnum::core::models::lattice::LatticeKind;

pub fn parse_lattice(s: &str) -> Result<LatticeKind> {
    s.parse::<LatticeKind>()
        .map_err(|e| CliError::Argument(e.to_string()))
}

pub fn parse_site(s: &str) -> Result<SiteKind> {
    s.parse::<SiteKind>()
        .map_err(|e| CliError::Argument(e.to_string()))
}

/// Parses Miller indices given as 'h,k,l'.
pub fn parse_facet(s: &str) -> Result<(i32, i32, i32)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CliError::Argument(format!(
            "expected Miller indices as 'h,k,l', got '{}'",
            s
        )));
    }
    let parse = |p: &str| {
        p.parse::<i32>()
            .map_err(|_| CliError::Argument(format!("invalid Miller index '{}' in '{}'", p, s)))
    };
    Ok((parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
}

/// Parses lateral replication counts given as 'nx,ny'.
pub fn parse_repetitions(s: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(CliError::Argument(format!(
            "expected replication counts as 'nx,ny', got '{}'",
            s
        )));
    }
    let parse = |p: &str| {
        p.parse::<usize>()
            .map_err(|_| CliError::Argument(format!("invalid replication count '{}' in '{}'", p, s)))
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}

/// Parses a comma-separated list of atom indices, e.g. '0,5,12'.
pub fn parse_site_indices(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .map(|p| {
            p.parse::<usize>()
                .map_err(|_| CliError::Argument(format!("invalid atom index '{}' in '{}'", p, s)))
        })
        .collect()
}
