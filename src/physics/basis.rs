// src/physics/basis.rs

use crate::error::LatticeError;
use crate::utils::geometry::Point3;
use crate::utils::linalg;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Below this |sin(gamma)| the a1/a2 pair is collinear
pub const SIN_GAMMA_EPSILON: f64 = 1e-6;

/// Minimum accepted volume, relative to a*b*c
pub const VOLUME_EPSILON: f64 = 1e-6;

/// Three Cartesian lattice vectors of one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub a1: Point3,
    pub a2: Point3,
    pub a3: Point3,
}

impl Basis {
    /// Vector by axis number (0, 1, 2)
    pub fn axis(&self, i: usize) -> Point3 {
        match i {
            0 => self.a1,
            1 => self.a2,
            _ => self.a3,
        }
    }

    pub fn axes(&self) -> [Point3; 3] {
        [self.a1, self.a2, self.a3]
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        linalg::lattice_matrix(&self.a1, &self.a2, &self.a3)
    }

    pub fn volume(&self) -> f64 {
        linalg::triple_product(&self.a1, &self.a2, &self.a3)
    }

    /// Reciprocal directions (a2 × a3, a3 × a1, a1 × a2), not normalized
    pub fn reciprocal(&self) -> [Point3; 3] {
        [
            self.a2.cross(&self.a3),
            self.a3.cross(&self.a1),
            self.a1.cross(&self.a2),
        ]
    }

    pub fn frac_to_cart(&self, frac: &Point3) -> Point3 {
        linalg::frac_to_cart(frac, &self.matrix())
    }

    pub fn cart_to_frac(&self, cart: &Point3) -> Option<Point3> {
        linalg::cart_to_frac(cart, &self.matrix())
    }

    /// Edges of the nx × ny × nz block
    pub fn scaled(&self, counts: [u32; 3]) -> Basis {
        Basis {
            a1: self.a1 * counts[0] as f64,
            a2: self.a2 * counts[1] as f64,
            a3: self.a3 * counts[2] as f64,
        }
    }
}

/// Builds the lattice vectors from lengths and angles (degrees).
///
/// a1 lies on x, a2 in the xy plane, a3 completes the right-handed cell.
/// Fully orthogonal cells take the diagonal shortcut, which is what the
/// general formula yields without the cos(90°) rounding noise.
///
/// The sqrt argument for a3.z is clamped at zero, but a cell whose volume
/// then falls below `VOLUME_EPSILON * a * b * c` is rejected instead of
/// being returned flattened.
pub fn build_basis(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Basis, LatticeError> {
    for (name, v) in [("a", a), ("b", b), ("c", c)] {
        if !(v.is_finite() && v > 0.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "length {} must be positive, got {}",
                name, v
            )));
        }
    }
    for (name, v) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
        if !(v.is_finite() && v > 0.0 && v < 180.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "angle {} must lie in (0, 180) degrees, got {}",
                name, v
            )));
        }
    }

    if alpha == 90.0 && beta == 90.0 && gamma == 90.0 {
        return Ok(Basis {
            a1: Point3::new(a, 0.0, 0.0),
            a2: Point3::new(0.0, b, 0.0),
            a3: Point3::new(0.0, 0.0, c),
        });
    }

    let (al, be, ga) = (alpha.to_radians(), beta.to_radians(), gamma.to_radians());
    let sin_g = ga.sin();
    if sin_g.abs() < SIN_GAMMA_EPSILON {
        return Err(LatticeError::DegenerateCell(format!(
            "gamma = {}° makes a1 and a2 collinear",
            gamma
        )));
    }

    let a1 = Point3::new(a, 0.0, 0.0);
    let a2 = Point3::new(b * ga.cos(), b * sin_g, 0.0);

    let cx = c * be.cos();
    let cy = c * (al.cos() - be.cos() * ga.cos()) / sin_g;
    let z_sq = 1.0 - (cx / c).powi(2) - (cy / c).powi(2);
    let cz = c * z_sq.max(0.0).sqrt();
    let a3 = Point3::new(cx, cy, cz);

    let basis = Basis { a1, a2, a3 };
    let volume = basis.volume();
    if !volume.is_finite() || volume <= VOLUME_EPSILON * a * b * c {
        return Err(LatticeError::DegenerateCell(format!(
            "angles ({}°, {}°, {}°) leave no cell volume",
            alpha, beta, gamma
        )));
    }
    Ok(basis)
}

/// Conventional hexagonal cell: a1 on x, a2 at 120°, c along z
pub fn hexagonal_basis(a: f64, c: f64) -> Result<Basis, LatticeError> {
    for (name, v) in [("a", a), ("c", c)] {
        if !(v.is_finite() && v > 0.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "length {} must be positive, got {}",
                name, v
            )));
        }
    }
    let h = a * 3f64.sqrt() / 2.0;
    Ok(Basis {
        a1: Point3::new(a, 0.0, 0.0),
        a2: Point3::new(-a / 2.0, h, 0.0),
        a3: Point3::new(0.0, 0.0, c),
    })
}

/// Closed-form cell volume a*b*c*sqrt(1 - cos²α - cos²β - cos²γ + 2 cosα cosβ cosγ)
pub fn cell_volume(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> f64 {
    let (ca, cb, cg) = (
        alpha.to_radians().cos(),
        beta.to_radians().cos(),
        gamma.to_radians().cos(),
    );
    let arg = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
    a * b * c * arg.max(0.0).sqrt()
}

/// Unit directions of a1, a2, a3
pub fn crystal_axes(basis: &Basis) -> [Point3; 3] {
    basis.axes().map(|v| v.normalize())
}

/// Four-axis hexagonal directions a1, a2, a3 = -(a1 + a2), c
pub fn hexagonal_axes(basis: &Basis) -> [Point3; 4] {
    [basis.a1, basis.a2, -(basis.a1 + basis.a2), basis.a3]
}
