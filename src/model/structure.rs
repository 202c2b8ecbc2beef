// src/model/structure.rs

use crate::model::lattice::{LatticeParameters, LatticeSystem};
use crate::model::miller::MillerIndex;
use crate::physics::basis::Basis;
use crate::utils::geometry::{self, Point3};
use serde::{Deserialize, Serialize};

/// Where a lattice point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    Corner,
    BodyCenter,
    BaseCenter,
    HexVertex,
    HexCenter,
    Interstitial,
}

impl PointKind {
    /// Short label used by the XYZ exporter and the report
    pub fn label(&self) -> &'static str {
        match self {
            PointKind::Corner => "X",
            PointKind::BodyCenter => "B",
            PointKind::BaseCenter => "F",
            PointKind::HexVertex => "V",
            PointKind::HexCenter => "H",
            PointKind::Interstitial => "I",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticePoint {
    /// Index into the point list of the pass that produced it
    pub id: usize,
    pub position: Point3,
    pub kind: PointKind,
}

/// Undirected edge between two point ids, stored as (min, max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
}

impl Bond {
    /// Canonical bond, or None for a self-bond
    pub fn new(p: usize, q: usize) -> Option<Self> {
        match p.cmp(&q) {
            std::cmp::Ordering::Less => Some(Bond { a: p, b: q }),
            std::cmp::Ordering::Greater => Some(Bond { a: q, b: p }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Ordered boundary of one plane/cell intersection (convex, >= 3 vertices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanePolygon {
    pub vertices: Vec<Point3>,
}

impl PlanePolygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn centroid(&self) -> Point3 {
        geometry::centroid(&self.vertices)
    }

    /// Vector area: half the sum of p_i × p_(i+1) around the loop
    pub fn vector_area(&self) -> Point3 {
        let n = self.vertices.len();
        let mut acc = Point3::zeros();
        for i in 0..n {
            acc += self.vertices[i].cross(&self.vertices[(i + 1) % n]);
        }
        acc * 0.5
    }

    pub fn area(&self) -> f64 {
        self.vector_area().norm()
    }

    /// Unit normal following the winding order
    pub fn normal(&self) -> Point3 {
        geometry::normalize(&self.vector_area())
    }
}

/// A polygon together with the index that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFace {
    pub index: MillerIndex,
    pub polygon: PlanePolygon,
}

/// Outcome of one requested plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneResult {
    pub index: MillerIndex,
    /// None when the plane touches the cell in fewer than 3 points
    pub polygon: Option<PlanePolygon>,
    pub intercepts: Vec<Point3>,
}

/// Everything one regeneration pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub system: LatticeSystem,
    pub params: LatticeParameters,
    pub basis: Basis,
    pub points: Vec<LatticePoint>,
    pub bonds: Vec<Bond>,
    pub faces: Vec<NamedFace>,
    pub planes: Vec<PlaneResult>,
}

impl GenerationResult {
    pub fn plane(&self, index: &MillerIndex) -> Option<&PlaneResult> {
        self.planes.iter().find(|p| &p.index == index)
    }

    /// Segment endpoints of every bond
    pub fn bond_segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.bonds.iter().filter_map(|bond| {
            let p = self.points.get(bond.a)?;
            let q = self.points.get(bond.b)?;
            Some((p.position, q.position))
        })
    }
}
