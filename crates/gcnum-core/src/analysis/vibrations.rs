use super::error::AnalysisError;
use crate::core::models::structure::AtomicStructure;

/// Pair motions with a swept bond angle above this threshold count as bends.
const BEND_ANGLE_DEGREES: f64 = 10.0;

/// Bond vectors shorter than this have no usable direction.
const DIRECTION_TOL: f64 = 1e-8;

/// Overall character of a vibration, judged from a set of atom pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationKind {
    Bending,
    SymmetricStretching,
    AsymmetricStretching,
    /// Mixed bend/stretch character across the pairs.
    Inconclusive,
}

/// Motion of a single atom pair between the trajectory's turning frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairMotion {
    /// The bond direction sweeps more than the bend threshold.
    Bend,
    /// The bond direction is steady while the length oscillates.
    Stretch {
        /// Whether the bond is shorter at the second turning frame.
        shortening: bool,
    },
}

/// Per-pair classification produced by [`characterize_vibration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCharacter {
    pub pair: (usize, usize),
    pub motion: PairMotion,
}

/// An atom that moves beyond a displacement threshold during the vibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    pub atom: usize,
    /// Displacement magnitude between the turning frames, in Angstroms.
    pub magnitude: f64,
}

/// Returns the indices of the two turning frames of a vibration trajectory.
///
/// A vibration trajectory sweeps one oscillation period, so the frames a
/// quarter and three quarters of the way through sit at the opposite
/// displacement extremes.
pub fn turning_frames(frames: &[AtomicStructure]) -> Result<(usize, usize), AnalysisError> {
    validate(frames)?;
    let n = frames.len();
    Ok((n / 4, 3 * n / 4))
}

/// Returns the minimum-image distance of an atom pair in every frame.
pub fn pair_distance_series(
    frames: &[AtomicStructure],
    i: usize,
    j: usize,
) -> Result<Vec<f64>, AnalysisError> {
    validate(frames)?;
    frames
        .iter()
        .map(|frame| {
            frame
                .distance(i, j, true)
                .ok_or(AnalysisError::SiteIndexOutOfBounds {
                    index: i.max(j),
                    atom_count: frame.len(),
                })
        })
        .collect()
}

/// Finds the atoms that displace during the vibration.
///
/// # Arguments
///
/// * `frames` - The vibration trajectory.
/// * `tolerance` - Minimum displacement in Angstroms to count. Guideline:
///   0.05 selects the main moving atoms, 0.01 nearly all of them.
pub fn displaced_atoms(
    frames: &[AtomicStructure],
    tolerance: f64,
) -> Result<Vec<Displacement>, AnalysisError> {
    let (lo, hi) = turning_frames(frames)?;
    let mut displaced = Vec::new();
    for atom in 0..frames[lo].len() {
        let a = frames[lo]
            .position(atom)
            .ok_or(AnalysisError::SiteIndexOutOfBounds {
                index: atom,
                atom_count: frames[lo].len(),
            })?;
        let b = frames[hi]
            .position(atom)
            .ok_or(AnalysisError::SiteIndexOutOfBounds {
                index: atom,
                atom_count: frames[hi].len(),
            })?;
        let magnitude = (b - a).norm();
        if magnitude >= tolerance {
            displaced.push(Displacement { atom, magnitude });
        }
    }
    Ok(displaced)
}

/// Returns the angle in degrees swept by the `ref_atom -> vib_atom` bond
/// direction between the two turning frames.
pub fn vibration_angle(
    frames: &[AtomicStructure],
    vib_atom: usize,
    ref_atom: usize,
) -> Result<f64, AnalysisError> {
    let (lo, hi) = turning_frames(frames)?;
    let dir = |frame: &AtomicStructure| -> Result<nalgebra::Vector3<f64>, AnalysisError> {
        let v = frame.position(vib_atom).zip(frame.position(ref_atom)).ok_or(
            AnalysisError::SiteIndexOutOfBounds {
                index: vib_atom.max(ref_atom),
                atom_count: frame.len(),
            },
        )?;
        let bond = v.0 - v.1;
        let length = bond.norm();
        if length < DIRECTION_TOL {
            return Err(AnalysisError::CoincidentAtoms {
                a: vib_atom,
                b: ref_atom,
            });
        }
        Ok(bond / length)
    };
    let v1 = dir(&frames[hi])?;
    let v2 = dir(&frames[lo])?;
    Ok(v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Characterizes a vibration as bending or (a)symmetric stretching.
///
/// Each pair is classified on its own: a swept bond angle above 10 degrees
/// is a bend, anything else a stretch whose phase is the sign of the bond
/// length change between the turning frames. The overall kind is bending if
/// every pair bends, symmetric stretching if every pair stretches in phase,
/// asymmetric stretching if the phases disagree, and inconclusive for mixed
/// bend/stretch character.
pub fn characterize_vibration(
    frames: &[AtomicStructure],
    pairs: &[(usize, usize)],
) -> Result<(VibrationKind, Vec<PairCharacter>), AnalysisError> {
    let (lo, hi) = turning_frames(frames)?;

    let mut characters = Vec::with_capacity(pairs.len());
    for &(a, b) in pairs {
        let angle = vibration_angle(frames, a, b)?;
        let motion = if angle > BEND_ANGLE_DEGREES {
            PairMotion::Bend
        } else {
            let out_of_bounds = || AnalysisError::SiteIndexOutOfBounds {
                index: a.max(b),
                atom_count: frames[lo].len(),
            };
            let d_lo = frames[lo].distance(a, b, true).ok_or_else(out_of_bounds)?;
            let d_hi = frames[hi].distance(a, b, true).ok_or_else(out_of_bounds)?;
            PairMotion::Stretch {
                shortening: d_lo - d_hi > 0.0,
            }
        };
        characters.push(PairCharacter { pair: (a, b), motion });
    }

    let all_bend = characters
        .iter()
        .all(|c| matches!(c.motion, PairMotion::Bend));
    let all_stretch = characters
        .iter()
        .all(|c| matches!(c.motion, PairMotion::Stretch { .. }));

    let kind = if characters.is_empty() {
        VibrationKind::Inconclusive
    } else if all_bend {
        VibrationKind::Bending
    } else if all_stretch {
        let phases: Vec<bool> = characters
            .iter()
            .filter_map(|c| match c.motion {
                PairMotion::Stretch { shortening } => Some(shortening),
                PairMotion::Bend => None,
            })
            .collect();
        if phases.iter().all(|&p| p) || phases.iter().all(|&p| !p) {
            VibrationKind::SymmetricStretching
        } else {
            VibrationKind::AsymmetricStretching
        }
    } else {
        VibrationKind::Inconclusive
    };

    Ok((kind, characters))
}

fn validate(frames: &[AtomicStructure]) -> Result<(), AnalysisError> {
    if frames.len() < 4 {
        return Err(AnalysisError::TrajectoryTooShort {
            frames: frames.len(),
        });
    }
    let expected = frames[0].len();
    for (frame, structure) in frames.iter().enumerate() {
        if structure.len() != expected {
            return Err(AnalysisError::FrameMismatch {
                frame,
                expected,
                found: structure.len(),
            });
        }
    }
    Ok(())
}
