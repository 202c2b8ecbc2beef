// src/physics/engine.rs

use crate::error::LatticeError;
use crate::model::lattice::{ConstraintPolicy, LatticeParameters, LatticeSystem};
use crate::model::miller::MillerIndex;
use crate::model::structure::{
    Bond, GenerationResult, LatticePoint, NamedFace, PlanePolygon, PlaneResult,
};
use crate::physics::basis::Basis;
use crate::physics::miller_math;
use crate::physics::operations::{bonds, supercell};
use crate::physics::polygon;
use crate::utils::geometry::Point3;
use log::{debug, warn};

/// The six cell faces in output order
pub const CELL_FACES: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Basal planes then the six {10-10} side faces, counter-clockwise from a1
pub const PRISM_FACES: [(i32, i32, i32, i32); 8] = [
    (0, 0, 0, 1),
    (0, 0, 0, -1),
    (1, 0, -1, 0),
    (0, 1, -1, 0),
    (-1, 1, 0, 0),
    (-1, 0, 1, 0),
    (0, -1, 1, 0),
    (1, -1, 0, 0),
];

/// One validated parameter set and its basis. All geometry of a pass
/// comes from here; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Engine {
    system: LatticeSystem,
    params: LatticeParameters,
    basis: Basis,
}

impl Engine {
    /// Validates `params` against `system` and builds the basis
    pub fn new(system: LatticeSystem, params: LatticeParameters) -> Result<Self, LatticeError> {
        system.check(&params)?;
        let basis = system.basis(&params)?;
        Ok(Self { system, params, basis })
    }

    /// Like `new`, but nudges rejected parameters when the policy allows.
    /// Returns the adjustments that were applied.
    pub fn with_policy(
        system: LatticeSystem,
        params: LatticeParameters,
        policy: ConstraintPolicy,
    ) -> Result<(Self, Vec<String>), LatticeError> {
        match (Self::new(system, params), policy) {
            (Ok(engine), _) => Ok((engine, Vec::new())),
            (Err(LatticeError::ConstraintViolation { .. }), ConstraintPolicy::Nudge) => {
                let (nudged, notes) = system.nudge(&params);
                for note in &notes {
                    warn!("{} parameters adjusted: {}", system, note);
                }
                Ok((Self::new(system, nudged)?, notes))
            }
            (Err(e), _) => Err(e),
        }
    }

    pub fn system(&self) -> LatticeSystem {
        self.system
    }

    pub fn params(&self) -> &LatticeParameters {
        &self.params
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Lattice points and bonds of the replicated cell
    pub fn generate(&self) -> (Vec<LatticePoint>, Vec<Bond>) {
        let motif = self.system.motif();
        let points = supercell::generate_points(&self.basis, self.params.counts(), motif);
        let steps = bonds::bond_steps(&self.basis, motif);
        let bond_list = bonds::generate_bonds(&points, &steps, self.system.bond_excluded());
        debug!(
            "{}: {} points, {} bonds",
            self.system,
            points.len(),
            bond_list.len()
        );
        (points.into_points(), bond_list)
    }

    /// Ordered intersection polygon of `index` with the cell, or None when
    /// the plane only touches it.
    pub fn compute_plane(&self, index: &MillerIndex) -> Result<Option<PlanePolygon>, LatticeError> {
        if index.is_bravais() && !self.system.is_hexagonal() {
            return Err(LatticeError::InvalidParameter(format!(
                "Miller-Bravais index {} needs a hexagonal system, not {}",
                index, self.system
            )));
        }

        let points = miller_math::intersect(&self.basis, self.params.counts(), index)?;
        if points.len() < 3 {
            warn!("Plane {} touches the cell in {} point(s); skipped", index, points.len());
            return Ok(None);
        }

        let vertices = match miller_math::plane_normal(&self.basis, index.hkl()) {
            Some(normal) => polygon::order_polygon_about(points, &normal),
            None => polygon::order_polygon(points),
        };
        debug!("Plane {}: {} vertices", index, vertices.len());
        Ok(Some(PlanePolygon { vertices }))
    }

    /// The six faces of the replicated parallelepiped, wound outwards
    pub fn compute_faces(&self) -> Vec<NamedFace> {
        self.named_faces(CELL_FACES.iter().map(|&(h, k, l)| MillerIndex::new(h, k, l)))
    }

    /// Faces of the hexagonal prism; only defined for hexagonal systems
    pub fn prism_faces(&self) -> Result<Vec<NamedFace>, LatticeError> {
        if !self.system.is_hexagonal() {
            return Err(LatticeError::InvalidParameter(format!(
                "{} has no hexagonal prism",
                self.system
            )));
        }
        Ok(self.named_faces(
            PRISM_FACES
                .iter()
                .map(|&(h, k, i, l)| MillerIndex::bravais(h, k, i, l)),
        ))
    }

    fn named_faces(&self, indices: impl Iterator<Item = MillerIndex>) -> Vec<NamedFace> {
        indices
            .filter_map(|index| match self.compute_plane(&index) {
                Ok(Some(polygon)) => Some(NamedFace { index, polygon }),
                Ok(None) => None,
                Err(e) => {
                    warn!("Face {} failed: {}", index, e);
                    None
                }
            })
            .collect()
    }

    pub fn intercepts(&self, index: &MillerIndex) -> Result<Vec<Point3>, LatticeError> {
        miller_math::intercepts(&self.basis, self.params.counts(), index)
    }

    /// One full pass: points, bonds, cell faces and every requested plane.
    /// Any invalid plane index fails the whole pass.
    pub fn run(&self, planes: &[MillerIndex]) -> Result<GenerationResult, LatticeError> {
        let (points, bond_list) = self.generate();

        let mut faces = self.compute_faces();
        if self.system.is_hexagonal() {
            faces.extend(self.prism_faces()?);
        }

        let planes = planes
            .iter()
            .map(|index| {
                Ok(PlaneResult {
                    index: *index,
                    polygon: self.compute_plane(index)?,
                    intercepts: self.intercepts(index)?,
                })
            })
            .collect::<Result<Vec<_>, LatticeError>>()?;

        Ok(GenerationResult {
            system: self.system,
            params: self.params,
            basis: self.basis,
            points,
            bonds: bond_list,
            faces,
            planes,
        })
    }
}

/// Points and bonds for one parameter set
pub fn generate(
    system: LatticeSystem,
    params: LatticeParameters,
) -> Result<(Vec<LatticePoint>, Vec<Bond>), LatticeError> {
    Ok(Engine::new(system, params)?.generate())
}

pub fn compute_plane(
    system: LatticeSystem,
    params: LatticeParameters,
    index: &MillerIndex,
) -> Result<Option<PlanePolygon>, LatticeError> {
    Engine::new(system, params)?.compute_plane(index)
}

pub fn compute_faces(
    system: LatticeSystem,
    params: LatticeParameters,
) -> Result<Vec<NamedFace>, LatticeError> {
    Ok(Engine::new(system, params)?.compute_faces())
}
