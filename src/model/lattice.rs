// src/model/lattice.rs

use crate::error::LatticeError;
use crate::model::structure::PointKind;
use crate::physics::basis::{self, Basis};
use crate::utils::geometry::EPSILON;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on nx·ny·nz for one pass
pub const MAX_CELLS: u64 = 8000;

/// Cell lengths, angles (degrees) and replication counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub nx: u32,
    pub ny: u32,
    pub nz: u32,
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self::cubic(1.0)
    }
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { a, b, c, alpha, beta, gamma, nx: 1, ny: 1, nz: 1 }
    }

    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// Hexagonal parameters: b = a, gamma = 120°
    pub fn hexagonal(a: f64, c: f64) -> Self {
        Self::new(a, a, c, 90.0, 90.0, 120.0)
    }

    pub fn with_cells(mut self, nx: u32, ny: u32, nz: u32) -> Self {
        self.nx = nx;
        self.ny = ny;
        self.nz = nz;
        self
    }

    pub fn counts(&self) -> [u32; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Range checks shared by every lattice system
    pub fn validate(&self) -> Result<(), LatticeError> {
        check_lengths(&[("a", self.a), ("b", self.b), ("c", self.c)])?;
        for (name, v) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !(v.is_finite() && v > 0.0 && v < 180.0) {
                return Err(LatticeError::InvalidParameter(format!(
                    "angle {} must lie in (0, 180) degrees, got {}",
                    name, v
                )));
            }
        }
        self.validate_counts()
    }

    /// Hexagonal cells only read a, c and the replication counts
    pub fn validate_hexagonal(&self) -> Result<(), LatticeError> {
        check_lengths(&[("a", self.a), ("c", self.c)])?;
        self.validate_counts()
    }

    fn validate_counts(&self) -> Result<(), LatticeError> {
        for (name, n) in [("nx", self.nx), ("ny", self.ny), ("nz", self.nz)] {
            if n == 0 {
                return Err(LatticeError::InvalidParameter(format!(
                    "replication count {} must be at least 1",
                    name
                )));
            }
        }
        let cells = self.nx as u64 * self.ny as u64 * self.nz as u64;
        if cells > MAX_CELLS {
            return Err(LatticeError::InvalidParameter(format!(
                "{}x{}x{} is {} cells, at most {} are supported",
                self.nx, self.ny, self.nz, cells, MAX_CELLS
            )));
        }
        Ok(())
    }
}

fn check_lengths(lengths: &[(&str, f64)]) -> Result<(), LatticeError> {
    for &(name, v) in lengths {
        if !(v.is_finite() && v > 0.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "length {} must be positive, got {}",
                name, v
            )));
        }
    }
    Ok(())
}

/// Parent crystal family of a centered lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellFamily {
    Cubic,
    Tetragonal,
    Orthorhombic,
    Monoclinic,
    Triclinic,
    Rhombohedral,
}

/// Face pair carrying the extra points of a base-centered cell.
/// A is spanned by (a2, a3), B by (a1, a3), C by (a1, a2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseFace {
    A,
    B,
    C,
}

impl BaseFace {
    /// Axis normal to the centered faces
    pub fn normal_axis(&self) -> usize {
        match self {
            BaseFace::A => 0,
            BaseFace::B => 1,
            BaseFace::C => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LatticeSystem {
    #[default]
    Cubic,
    Tetragonal,
    Orthorhombic,
    Monoclinic,
    Triclinic,
    Rhombohedral,
    HexagonalSimple,
    HexagonalClosePacked,
    BodyCentered(CellFamily),
    BaseCentered(CellFamily, BaseFace),
}

/// What to do with parameters that break the system's constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstraintPolicy {
    /// Return the `ConstraintViolation`
    #[default]
    Reject,
    /// Apply `LatticeSystem::nudge` and report the adjustments
    Nudge,
}

/// Point template replicated over the cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motif {
    Simple,
    BodyCentered,
    BaseCentered(BaseFace),
    HexagonalPrism,
    HexagonalClosePacked,
}

impl Motif {
    pub fn is_hexagonal(&self) -> bool {
        matches!(self, Motif::HexagonalPrism | Motif::HexagonalClosePacked)
    }
}

fn close(x: f64, y: f64) -> bool {
    (x - y).abs() < EPSILON
}

fn violation(system: &LatticeSystem, reason: &str) -> LatticeError {
    LatticeError::ConstraintViolation {
        system: system.to_string(),
        reason: reason.to_string(),
    }
}

/// +1° (or -1° near the upper bound) until the angle differs from all `taken`
fn bump_angle(mut angle: f64, taken: &[f64]) -> f64 {
    let step = if angle + 1.0 < 180.0 { 1.0 } else { -1.0 };
    while taken.iter().any(|&t| close(t, angle)) {
        angle += step;
    }
    angle
}

impl LatticeSystem {
    /// Family whose cell constraints apply; None for the hexagonal systems
    pub fn family(&self) -> Option<CellFamily> {
        match *self {
            LatticeSystem::Cubic => Some(CellFamily::Cubic),
            LatticeSystem::Tetragonal => Some(CellFamily::Tetragonal),
            LatticeSystem::Orthorhombic => Some(CellFamily::Orthorhombic),
            LatticeSystem::Monoclinic => Some(CellFamily::Monoclinic),
            LatticeSystem::Triclinic => Some(CellFamily::Triclinic),
            LatticeSystem::Rhombohedral => Some(CellFamily::Rhombohedral),
            LatticeSystem::HexagonalSimple | LatticeSystem::HexagonalClosePacked => None,
            LatticeSystem::BodyCentered(f) | LatticeSystem::BaseCentered(f, _) => Some(f),
        }
    }

    pub fn motif(&self) -> Motif {
        match *self {
            LatticeSystem::HexagonalSimple => Motif::HexagonalPrism,
            LatticeSystem::HexagonalClosePacked => Motif::HexagonalClosePacked,
            LatticeSystem::BodyCentered(_) => Motif::BodyCentered,
            LatticeSystem::BaseCentered(_, face) => Motif::BaseCentered(face),
            _ => Motif::Simple,
        }
    }

    pub fn is_hexagonal(&self) -> bool {
        self.family().is_none()
    }

    /// Point kinds drawn but never bonded
    pub fn bond_excluded(&self) -> &'static [PointKind] {
        match self {
            LatticeSystem::BodyCentered(_) => &[PointKind::BodyCenter],
            LatticeSystem::BaseCentered(..) => &[PointKind::BaseCenter],
            LatticeSystem::HexagonalClosePacked => &[PointKind::HexCenter],
            _ => &[],
        }
    }

    /// Basis for this system. Hexagonal systems ignore b and the angles.
    pub fn basis(&self, p: &LatticeParameters) -> Result<Basis, LatticeError> {
        if self.is_hexagonal() {
            basis::hexagonal_basis(p.a, p.c)
        } else {
            basis::build_basis(p.a, p.b, p.c, p.alpha, p.beta, p.gamma)
        }
    }

    /// Validates the per-family constraints, returning a typed rejection
    pub fn check(&self, p: &LatticeParameters) -> Result<(), LatticeError> {
        let Some(family) = self.family() else {
            return p.validate_hexagonal();
        };
        p.validate()?;

        let right = |x: f64| close(x, 90.0);
        let all_right = right(p.alpha) && right(p.beta) && right(p.gamma);
        let equal_lengths = close(p.a, p.b) && close(p.b, p.c);

        match family {
            CellFamily::Cubic => {
                if !equal_lengths {
                    return Err(violation(self, "requires a = b = c"));
                }
                if !all_right {
                    return Err(violation(self, "requires alpha = beta = gamma = 90°"));
                }
            }
            CellFamily::Tetragonal => {
                if !close(p.a, p.b) || close(p.a, p.c) {
                    return Err(violation(self, "requires a = b != c"));
                }
                if !all_right {
                    return Err(violation(self, "requires alpha = beta = gamma = 90°"));
                }
            }
            CellFamily::Orthorhombic => {
                if close(p.a, p.b) || close(p.b, p.c) || close(p.a, p.c) {
                    return Err(violation(self, "requires pairwise distinct a, b, c"));
                }
                if !all_right {
                    return Err(violation(self, "requires alpha = beta = gamma = 90°"));
                }
            }
            CellFamily::Monoclinic => {
                if !right(p.alpha) || !right(p.beta) {
                    return Err(violation(self, "requires alpha = beta = 90°"));
                }
                if right(p.gamma) {
                    return Err(violation(self, "requires gamma != 90°"));
                }
            }
            CellFamily::Triclinic => {
                if close(p.alpha, p.beta) || close(p.beta, p.gamma) || close(p.alpha, p.gamma) {
                    return Err(violation(self, "requires pairwise distinct alpha, beta, gamma"));
                }
            }
            CellFamily::Rhombohedral => {
                if !equal_lengths {
                    return Err(violation(self, "requires a = b = c"));
                }
                if !(close(p.alpha, p.beta) && close(p.beta, p.gamma)) {
                    return Err(violation(self, "requires alpha = beta = gamma"));
                }
                if right(p.alpha) {
                    return Err(violation(self, "requires alpha != 90°"));
                }
            }
        }
        Ok(())
    }

    /// Adjusts parameters until `check` passes. Every change is reported.
    pub fn nudge(&self, p: &LatticeParameters) -> (LatticeParameters, Vec<String>) {
        let mut q = *p;
        let mut notes = Vec::new();

        let mut set = |field: &str, slot: &mut f64, value: f64| {
            if !close(*slot, value) {
                notes.push(format!("{}: {} -> {}", field, *slot, value));
                *slot = value;
            }
        };

        let Some(family) = self.family() else {
            set("b", &mut q.b, p.a);
            set("alpha", &mut q.alpha, 90.0);
            set("beta", &mut q.beta, 90.0);
            set("gamma", &mut q.gamma, 120.0);
            return (q, notes);
        };

        match family {
            CellFamily::Cubic => {
                set("b", &mut q.b, p.a);
                set("c", &mut q.c, p.a);
                set("alpha", &mut q.alpha, 90.0);
                set("beta", &mut q.beta, 90.0);
                set("gamma", &mut q.gamma, 90.0);
            }
            CellFamily::Tetragonal => {
                set("b", &mut q.b, p.a);
                if close(p.c, p.a) {
                    set("c", &mut q.c, p.a + 0.5);
                }
                set("alpha", &mut q.alpha, 90.0);
                set("beta", &mut q.beta, 90.0);
                set("gamma", &mut q.gamma, 90.0);
            }
            CellFamily::Orthorhombic => {
                let b = if close(p.b, p.a) { p.a + 0.5 } else { p.b };
                set("b", &mut q.b, b);
                if close(p.c, p.a) || close(p.c, b) {
                    set("c", &mut q.c, p.a.max(b) + 0.5);
                }
                set("alpha", &mut q.alpha, 90.0);
                set("beta", &mut q.beta, 90.0);
                set("gamma", &mut q.gamma, 90.0);
            }
            CellFamily::Monoclinic => {
                set("alpha", &mut q.alpha, 90.0);
                set("beta", &mut q.beta, 90.0);
                if close(p.gamma, 90.0) {
                    set("gamma", &mut q.gamma, 89.0);
                }
            }
            CellFamily::Triclinic => {
                let beta = bump_angle(p.beta, &[p.alpha]);
                set("beta", &mut q.beta, beta);
                let gamma = bump_angle(p.gamma, &[p.alpha, beta]);
                set("gamma", &mut q.gamma, gamma);
            }
            CellFamily::Rhombohedral => {
                set("b", &mut q.b, p.a);
                set("c", &mut q.c, p.a);
                let alpha = if close(p.alpha, 90.0) { 89.0 } else { p.alpha };
                set("alpha", &mut q.alpha, alpha);
                set("beta", &mut q.beta, alpha);
                set("gamma", &mut q.gamma, alpha);
            }
        }

        (q, notes)
    }
}

impl fmt::Display for CellFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CellFamily::Cubic => "cubic",
            CellFamily::Tetragonal => "tetragonal",
            CellFamily::Orthorhombic => "orthorhombic",
            CellFamily::Monoclinic => "monoclinic",
            CellFamily::Triclinic => "triclinic",
            CellFamily::Rhombohedral => "rhombohedral",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for LatticeSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LatticeSystem::HexagonalSimple => write!(f, "hexagonal"),
            LatticeSystem::HexagonalClosePacked => write!(f, "hexagonal close-packed"),
            LatticeSystem::BodyCentered(fam) => write!(f, "body-centered {}", fam),
            LatticeSystem::BaseCentered(fam, face) => write!(f, "base-centered ({:?}) {}", face, fam),
            other => match other.family() {
                Some(fam) => write!(f, "{}", fam),
                None => Ok(()),
            },
        }
    }
}

impl FromStr for CellFamily {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cubic" => Ok(CellFamily::Cubic),
            "tetragonal" => Ok(CellFamily::Tetragonal),
            "orthorhombic" => Ok(CellFamily::Orthorhombic),
            "monoclinic" => Ok(CellFamily::Monoclinic),
            "triclinic" => Ok(CellFamily::Triclinic),
            "rhombohedral" | "trigonal" => Ok(CellFamily::Rhombohedral),
            other => Err(LatticeError::InvalidParameter(format!(
                "unknown cell family '{}'",
                other
            ))),
        }
    }
}

impl FromStr for LatticeSystem {
    type Err = LatticeError;

    /// Accepts plain family names, the usual short forms (sc, bcc, bct, hcp)
    /// and `body-centered-<family>` / `base-centered-<family>[-a|-b|-c]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('_', "-");
        match name.as_str() {
            "sc" => return Ok(LatticeSystem::Cubic),
            "bcc" => return Ok(LatticeSystem::BodyCentered(CellFamily::Cubic)),
            "bct" => return Ok(LatticeSystem::BodyCentered(CellFamily::Tetragonal)),
            "hexagonal" | "hex" => return Ok(LatticeSystem::HexagonalSimple),
            "hcp" | "hexagonal-close-packed" => return Ok(LatticeSystem::HexagonalClosePacked),
            _ => {}
        }

        if let Some(rest) = name.strip_prefix("body-centered-") {
            return Ok(LatticeSystem::BodyCentered(rest.parse()?));
        }
        if let Some(rest) = name.strip_prefix("base-centered-") {
            let (family, face) = match rest.rsplit_once('-') {
                Some((fam, "a")) => (fam, Some(BaseFace::A)),
                Some((fam, "b")) => (fam, Some(BaseFace::B)),
                Some((fam, "c")) => (fam, Some(BaseFace::C)),
                _ => (rest, None),
            };
            let family: CellFamily = family.parse()?;
            // Monoclinic defaults to the B face, everything else to C
            let face = face.unwrap_or(match family {
                CellFamily::Monoclinic => BaseFace::B,
                _ => BaseFace::C,
            });
            return Ok(LatticeSystem::BaseCentered(family, face));
        }

        let family: CellFamily = name.parse()?;
        Ok(match family {
            CellFamily::Cubic => LatticeSystem::Cubic,
            CellFamily::Tetragonal => LatticeSystem::Tetragonal,
            CellFamily::Orthorhombic => LatticeSystem::Orthorhombic,
            CellFamily::Monoclinic => LatticeSystem::Monoclinic,
            CellFamily::Triclinic => LatticeSystem::Triclinic,
            CellFamily::Rhombohedral => LatticeSystem::Rhombohedral,
        })
    }
}
