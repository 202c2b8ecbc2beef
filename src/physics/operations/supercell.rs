// src/physics/operations/supercell.rs

use crate::model::lattice::{BaseFace, Motif};
use crate::model::structure::{LatticePoint, PointKind};
use crate::physics::basis::Basis;
use crate::utils::geometry::{self, Point3, PointKey};
use std::collections::HashMap;

/// Insertion-ordered point list with tolerance-based identity.
///
/// Positions are hashed by their quantized key; a new position within
/// `EPSILON` of a stored one resolves to the stored id (first seen wins).
#[derive(Debug, Default, Clone)]
pub struct PointSet {
    points: Vec<LatticePoint>,
    index: HashMap<PointKey, usize>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the stored point matching `pos`, if any
    pub fn find(&self, pos: &Point3) -> Option<usize> {
        geometry::neighbour_keys(geometry::quantize(pos))
            .filter_map(|key| self.index.get(&key).copied())
            .find(|&id| geometry::same_point(&self.points[id].position, pos))
    }

    /// Returns the id of `pos`, inserting it when unseen
    pub fn insert(&mut self, pos: Point3, kind: PointKind) -> usize {
        if let Some(id) = self.find(&pos) {
            return id;
        }
        let id = self.points.len();
        self.points.push(LatticePoint { id, position: pos, kind });
        self.index.insert(geometry::quantize(&pos), id);
        id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LatticePoint> {
        self.points
    }
}

// Hexagon vertices at 0°, 60°, ..., 300° in (a1, a2) fractions
const HEX_VERTICES: [(f64, f64); 6] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
];

// Close-packed middle layer at 30°, 150°, 270°, radius a/sqrt(3)
const HCP_INTERSTITIALS: [(f64, f64); 3] = [
    (2.0 / 3.0, 1.0 / 3.0),
    (-1.0 / 3.0, 1.0 / 3.0),
    (-1.0 / 3.0, -2.0 / 3.0),
];

/// Enumerates the lattice points of an nx × ny × nz block.
///
/// Parallelepiped motifs emit the (n+1)³ corner grid first, then the
/// centering points cell by cell. Hexagonal motifs stamp one prism per
/// cell on the edge-sharing hexagon tiling.
pub fn generate_points(basis: &Basis, counts: [u32; 3], motif: Motif) -> PointSet {
    let mut set = PointSet::new();
    let [nx, ny, nz] = counts;

    if motif.is_hexagonal() {
        generate_hexagonal(&mut set, basis, counts, motif == Motif::HexagonalClosePacked);
        return set;
    }

    // 1. Corner grid
    for i in 0..=nx {
        for j in 0..=ny {
            for k in 0..=nz {
                let frac = Point3::new(i as f64, j as f64, k as f64);
                set.insert(basis.frac_to_cart(&frac), PointKind::Corner);
            }
        }
    }

    // 2. Centering points
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let origin = Point3::new(i as f64, j as f64, k as f64);
                match motif {
                    Motif::BodyCentered => {
                        let frac = origin + Point3::new(0.5, 0.5, 0.5);
                        set.insert(basis.frac_to_cart(&frac), PointKind::BodyCenter);
                    }
                    Motif::BaseCentered(face) => {
                        for frac in base_centers(&origin, face) {
                            set.insert(basis.frac_to_cart(&frac), PointKind::BaseCenter);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    set
}

/// Centres of the two opposing faces normal to the face's axis
fn base_centers(origin: &Point3, face: BaseFace) -> [Point3; 2] {
    let axis = face.normal_axis();
    let mut near = Point3::new(0.5, 0.5, 0.5);
    near[axis] = 0.0;
    let mut far = near;
    far[axis] = 1.0;
    [origin + near, origin + far]
}

fn generate_hexagonal(set: &mut PointSet, basis: &Basis, counts: [u32; 3], close_packed: bool) {
    let [nx, ny, nz] = counts;

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                // Tiling translations (3a/2, a√3/2) = 2a1 + a2 and (0, a√3) = a1 + 2a2
                let (i, j) = (i as f64, j as f64);
                let origin = Point3::new(2.0 * i + j, i + 2.0 * j, k as f64);

                for layer in [0.0, 1.0] {
                    for (u, v) in HEX_VERTICES {
                        let frac = origin + Point3::new(u, v, layer);
                        set.insert(basis.frac_to_cart(&frac), PointKind::HexVertex);
                    }
                }

                if close_packed {
                    for (u, v) in HCP_INTERSTITIALS {
                        let frac = origin + Point3::new(u, v, 0.5);
                        set.insert(basis.frac_to_cart(&frac), PointKind::Interstitial);
                    }
                }

                for layer in [0.0, 1.0] {
                    let frac = origin + Point3::new(0.0, 0.0, layer);
                    set.insert(basis.frac_to_cart(&frac), PointKind::HexCenter);
                }
            }
        }
    }
}
