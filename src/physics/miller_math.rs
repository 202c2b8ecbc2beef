// src/physics/miller_math.rs

use crate::error::LatticeError;
use crate::model::miller::MillerIndex;
use crate::physics::basis::{self, Basis};
use crate::utils::geometry::{Point3, EPSILON};

/// Unit plane normal from the reciprocal construction
/// h(a2 × a3) + k(a3 × a1) + l(a1 × a2)
pub fn plane_normal(basis: &Basis, hkl: [i32; 3]) -> Option<Point3> {
    let r = basis.reciprocal();
    let n = r[0] * hkl[0] as f64 + r[1] * hkl[1] as f64 + r[2] * hkl[2] as f64;
    let mag = n.norm();
    if mag > 1e-12 { Some(n / mag) } else { None }
}

/// Unordered boundary points of plane `index` on the replicated cell.
///
/// Three-index planes are cut against the nx × ny × nz parallelepiped,
/// Miller-Bravais planes against the hexagonal prism of radius |a1| centred
/// on the origin and nz·c tall. Fewer than three returned points means the
/// plane only touches the cell.
pub fn intersect(
    basis: &Basis,
    counts: [u32; 3],
    index: &MillerIndex,
) -> Result<Vec<Point3>, LatticeError> {
    index.validate()?;
    match *index {
        MillerIndex::Miller { h, k, l } => Ok(intersect_parallelepiped(basis, counts, [h, k, l])),
        MillerIndex::Bravais { h, k, i, l } => Ok(intersect_prism(basis, counts[2], [h, k, i, l])),
    }
}

fn intersect_parallelepiped(basis: &Basis, counts: [u32; 3], hkl: [i32; 3]) -> Vec<Point3> {
    let e = basis.scaled(counts).axes();

    // 1. Face-parallel planes: emit the face directly
    let nonzero: Vec<usize> = (0..3).filter(|&j| hkl[j] != 0).collect();
    if nonzero.len() == 1 {
        let axis = nonzero[0];
        let origin = if hkl[axis] > 0 { e[axis] } else { Point3::zeros() };
        let u = e[(axis + 1) % 3];
        let v = e[(axis + 2) % 3];
        return vec![origin, origin + u, origin + u + v, origin + v];
    }

    let Some(normal) = plane_normal(basis, hkl) else {
        return Vec::new();
    };

    // 2. Offset from the reference point picked by the first non-zero index
    let first = nonzero[0];
    let reference = if hkl[first] > 0 { e[first] } else { Point3::zeros() };
    let d = normal.dot(&reference);

    // 3. The 12 edges: 4 parallel copies of each cell edge
    let corner = |i: usize, j: usize, k: usize| e[0] * i as f64 + e[1] * j as f64 + e[2] * k as f64;
    let mut edges = Vec::with_capacity(12);
    for axis in 0..3 {
        for s in 0..2 {
            for t in 0..2 {
                let mut lo = [0usize; 3];
                lo[(axis + 1) % 3] = s;
                lo[(axis + 2) % 3] = t;
                let mut hi = lo;
                hi[axis] = 1;
                edges.push((corner(lo[0], lo[1], lo[2]), corner(hi[0], hi[1], hi[2])));
            }
        }
    }

    cut_edges(&edges, &normal, d)
}

fn intersect_prism(basis: &Basis, nz: u32, hkil: [i32; 4]) -> Vec<Point3> {
    let [h, k, i, l] = hkil;
    let axes = basis::hexagonal_axes(basis);
    let height = basis.a3 * nz as f64;

    // Vertices at 0°, 60°, ..., 300°
    let ring = [
        basis.a1,
        basis.a1 + basis.a2,
        basis.a2,
        -basis.a1,
        -(basis.a1 + basis.a2),
        -basis.a2,
    ];

    // 1. Basal planes: the hexagon itself
    if h == 0 && k == 0 && i == 0 {
        let lift = if l > 0 { height } else { Point3::zeros() };
        return ring.iter().map(|v| v + lift).collect();
    }

    let Some(normal) = plane_normal(basis, [h, k, l]) else {
        return Vec::new();
    };

    // 2. Reference: the a-axis vertex of the first non-zero of (h, k, i)
    let reference = [h, k, i]
        .iter()
        .zip(axes.iter())
        .find(|(&n, _)| n != 0)
        .map(|(&n, axis)| if n > 0 { *axis } else { -axis })
        .unwrap_or(Point3::zeros());
    let d = normal.dot(&reference);

    // 3. 6 base edges, 6 top edges, 6 verticals
    let mut edges = Vec::with_capacity(18);
    for j in 0..6 {
        let p = ring[j];
        let q = ring[(j + 1) % 6];
        edges.push((p, q));
        edges.push((p + height, q + height));
        edges.push((p, p + height));
    }

    cut_edges(&edges, &normal, d)
}

/// Points where the plane n·x = d crosses the segments, deduplicated
fn cut_edges(edges: &[(Point3, Point3)], normal: &Point3, d: f64) -> Vec<Point3> {
    let mut points: Vec<Point3> = Vec::new();

    for (p1, p2) in edges {
        let dir = p2 - p1;
        let denom = normal.dot(&dir);
        if denom.abs() < EPSILON {
            continue;
        }
        let t = (d - normal.dot(p1)) / denom;
        if !(-EPSILON..=1.0 + EPSILON).contains(&t) {
            continue;
        }
        let p = p1 + dir * t.clamp(0.0, 1.0);
        if !points.iter().any(|q| (q - p).norm() < EPSILON) {
            points.push(p);
        }
    }

    points
}

/// Axial intercepts of a plane: a_j / index_j for every non-zero component.
///
/// Three-index planes use the replicated cell edges with the origin shifted
/// to the far end of every axis with a negative index. Four-index planes
/// use the a1, a2, a3 and c directions from the prism centre.
pub fn intercepts(basis: &Basis, counts: [u32; 3], index: &MillerIndex) -> Result<Vec<Point3>, LatticeError> {
    index.validate()?;
    match *index {
        MillerIndex::Miller { h, k, l } => {
            let e = basis.scaled(counts).axes();
            let hkl = [h, k, l];
            let origin = (0..3)
                .filter(|&j| hkl[j] < 0)
                .fold(Point3::zeros(), |acc, j| acc + e[j]);
            Ok((0..3)
                .filter(|&j| hkl[j] != 0)
                .map(|j| origin + e[j] / hkl[j] as f64)
                .collect())
        }
        MillerIndex::Bravais { h, k, i, l } => {
            let mut axes = basis::hexagonal_axes(basis);
            axes[3] *= counts[2] as f64;
            Ok([h, k, i, l]
                .iter()
                .zip(axes.iter())
                .filter(|(&n, _)| n != 0)
                .map(|(&n, axis)| axis / n as f64)
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::basis::{build_basis, hexagonal_basis};
    use approx::assert_abs_diff_eq;

    fn unit_cube() -> Basis {
        build_basis(1.0, 1.0, 1.0, 90.0, 90.0, 90.0).unwrap()
    }

    fn contains(points: &[Point3], p: Point3) -> bool {
        points.iter().any(|q| (q - p).norm() < 1e-6)
    }

    #[test]
    fn test_normal_cubic_matches_index() {
        let n = plane_normal(&unit_cube(), [1, 1, 1]).unwrap();
        let expected = Point3::new(1.0, 1.0, 1.0).normalize();
        assert_abs_diff_eq!(n, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_is_perpendicular_to_in_plane_vectors() {
        // (hkl) contains a1/h - a2/k and a2/k - a3/l
        let b = build_basis(1.0, 1.2, 0.9, 87.0, 84.0, 69.0).unwrap();
        let n = plane_normal(&b, [1, 2, 3]).unwrap();
        let u = b.a1 / 1.0 - b.a2 / 2.0;
        let v = b.a2 / 2.0 - b.a3 / 3.0;
        assert_abs_diff_eq!(n.dot(&u), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.dot(&v), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_faces_are_short_circuited() {
        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(1, 0, 0)).unwrap();
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|p| (p.x - 1.0).abs() < 1e-12));

        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(-1, 0, 0)).unwrap();
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|p| p.x.abs() < 1e-12));
    }

    #[test]
    fn test_higher_order_face_lands_on_same_face() {
        let a = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(0, 2, 0)).unwrap();
        let b = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(0, 1, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_corner_triangle() {
        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(1, 1, 1)).unwrap();
        assert_eq!(pts.len(), 3);
        assert!(contains(&pts, Point3::new(1.0, 0.0, 0.0)));
        assert!(contains(&pts, Point3::new(0.0, 1.0, 0.0)));
        assert!(contains(&pts, Point3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_one_zero_index_scans_edges() {
        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(1, 1, 0)).unwrap();
        assert_eq!(pts.len(), 4);
        for p in [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ] {
            assert!(contains(&pts, p));
        }
    }

    #[test]
    fn test_mixed_sign_plane() {
        // x + y - z = 1 passes through (1,0,0), (0,1,0) and (1,1,1)
        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(1, 1, -1)).unwrap();
        let n = Point3::new(1.0, 1.0, -1.0);
        for p in &pts {
            assert_abs_diff_eq!(n.dot(p), 1.0, epsilon = 1e-9);
        }
        assert_eq!(pts.len(), 3);
        assert!(contains(&pts, Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_replication_scales_far_face() {
        let pts = intersect(&unit_cube(), [2, 3, 1], &MillerIndex::new(0, 1, 0)).unwrap();
        assert!(pts.iter().all(|p| (p.y - 3.0).abs() < 1e-12));
        assert!(contains(&pts, Point3::new(2.0, 3.0, 1.0)));

        // x + y + z = 2 against a 2×2×2 block
        let pts = intersect(&unit_cube(), [2, 2, 2], &MillerIndex::new(1, 1, 1)).unwrap();
        assert_eq!(pts.len(), 3);
        assert!(contains(&pts, Point3::new(2.0, 0.0, 0.0)));
        assert!(contains(&pts, Point3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_all_negative_plane_only_touches_origin() {
        let pts = intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(-1, -1, -1)).unwrap();
        assert_eq!(pts, vec![Point3::zeros()]);
    }

    #[test]
    fn test_zero_index_rejected() {
        assert!(matches!(
            intersect(&unit_cube(), [1, 1, 1], &MillerIndex::new(0, 0, 0)),
            Err(LatticeError::NotAPlane(_))
        ));
    }

    #[test]
    fn test_oblique_plane_points_lie_on_plane() {
        let b = build_basis(1.0, 1.5, 0.8, 82.0, 81.0, 77.0).unwrap();
        let pts = intersect(&b, [1, 1, 1], &MillerIndex::new(1, 1, 1)).unwrap();
        assert_eq!(pts.len(), 3);
        assert!(contains(&pts, b.a1));
        assert!(contains(&pts, b.a2));
        assert!(contains(&pts, b.a3));
    }

    #[test]
    fn test_basal_plane_is_hexagon() {
        let b = hexagonal_basis(1.0, 1.633).unwrap();
        let top = intersect(&b, [1, 1, 2], &MillerIndex::bravais(0, 0, 0, 1)).unwrap();
        assert_eq!(top.len(), 6);
        assert!(top.iter().all(|p| (p.z - 3.266).abs() < 1e-9));
        assert!(top.iter().all(|p| (Point3::new(p.x, p.y, 0.0).norm() - 1.0).abs() < 1e-9));

        let base = intersect(&b, [1, 1, 1], &MillerIndex::bravais(0, 0, 0, -1)).unwrap();
        assert!(base.iter().all(|p| p.z.abs() < 1e-12));
    }

    #[test]
    fn test_prism_side_face() {
        let b = hexagonal_basis(1.0, 1.633).unwrap();
        let pts = intersect(&b, [1, 1, 1], &MillerIndex::bravais(1, 0, -1, 0)).unwrap();
        assert_eq!(pts.len(), 4);
        assert!(contains(&pts, b.a1));
        assert!(contains(&pts, b.a1 + b.a2));
        assert!(contains(&pts, b.a1 + b.a3));
        assert!(contains(&pts, b.a1 + b.a2 + b.a3));
    }

    #[test]
    fn test_pyramidal_plane_cuts_prism() {
        let b = hexagonal_basis(1.0, 1.633).unwrap();
        let pts = intersect(&b, [1, 1, 1], &MillerIndex::bravais(1, 0, -1, 1)).unwrap();
        assert!(pts.len() >= 3);
        let n = plane_normal(&b, [1, 0, 1]).unwrap();
        let d = n.dot(&b.a1);
        for p in &pts {
            assert_abs_diff_eq!(n.dot(p), d, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_bad_bravais_sum_rejected() {
        let b = hexagonal_basis(1.0, 1.633).unwrap();
        assert!(matches!(
            intersect(&b, [1, 1, 1], &MillerIndex::bravais(1, 1, 0, 0)),
            Err(LatticeError::InvalidBravaisIndex { .. })
        ));
    }

    #[test]
    fn test_intercepts() {
        let b = build_basis(2.0, 2.0, 2.0, 90.0, 90.0, 90.0).unwrap();
        let pts = intercepts(&b, [1, 1, 1], &MillerIndex::new(1, 2, 0)).unwrap();
        assert_eq!(pts, vec![Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)]);

        // Negative h moves the origin to x = a
        let pts = intercepts(&b, [1, 1, 1], &MillerIndex::new(-1, 0, 1)).unwrap();
        assert_eq!(pts, vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 2.0)]);

        let hex = hexagonal_basis(1.0, 1.5).unwrap();
        let pts = intercepts(&hex, [1, 1, 2], &MillerIndex::bravais(0, 0, 0, 1)).unwrap();
        assert_eq!(pts, vec![Point3::new(0.0, 0.0, 3.0)]);
    }
}
