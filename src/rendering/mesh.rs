// src/rendering/mesh.rs
// Double-sided triangle meshes for plane polygons

use crate::model::structure::PlanePolygon;
use crate::utils::geometry::Point3;

/// Indexed triangle list. Vertices [0, n) face along the polygon normal,
/// [n, 2n) are the same positions facing the other way.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMesh {
    pub vertices: Vec<Point3>,
    pub normals: Vec<Point3>,
    pub triangles: Vec<[usize; 3]>,
}

impl PlaneMesh {
    /// Fan-triangulates an ordered convex polygon from vertex 0
    pub fn from_polygon(polygon: &PlanePolygon) -> Option<Self> {
        let n = polygon.len();
        if n < 3 {
            return None;
        }
        let normal = polygon.normal();

        let mut vertices = polygon.vertices.clone();
        vertices.extend_from_slice(&polygon.vertices);

        let mut normals = vec![normal; n];
        normals.extend(std::iter::repeat(-normal).take(n));

        let mut triangles = Vec::with_capacity(2 * (n - 2));
        // Front
        for i in 1..n - 1 {
            triangles.push([0, i, i + 1]);
        }
        // Back: reversed winding
        for i in 1..n - 1 {
            triangles.push([n, n + i + 1, n + i]);
        }

        Some(Self { vertices, normals, triangles })
    }

    /// Total area of the front side
    pub fn front_area(&self) -> f64 {
        let half = self.triangles.len() / 2;
        self.triangles[..half]
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i]);
                0.5 * (b - a).cross(&(c - a)).norm()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PlanePolygon {
        PlanePolygon {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_square_mesh() {
        let mesh = PlaneMesh::from_polygon(&square()).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3], [4, 6, 5], [4, 7, 6]]);
        assert!((mesh.front_area() - 1.0).abs() < 1e-12);
        assert_eq!(mesh.normals[0], Point3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.normals[4], Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_back_faces_point_away() {
        let mesh = PlaneMesh::from_polygon(&square()).unwrap();
        for (k, t) in mesh.triangles.iter().enumerate() {
            let [a, b, c] = t.map(|i| mesh.vertices[i]);
            let n = (b - a).cross(&(c - a));
            assert!(n.dot(&mesh.normals[t[0]]) > 0.0, "triangle {}", k);
        }
    }

    #[test]
    fn test_too_few_vertices() {
        let line = PlanePolygon { vertices: vec![Point3::zeros(), Point3::new(1.0, 0.0, 0.0)] };
        assert!(PlaneMesh::from_polygon(&line).is_none());
    }
}
