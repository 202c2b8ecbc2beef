// src/utils/geometry.rs

use nalgebra::Vector3;

pub type Point3 = Vector3<f64>;

/// Absolute tolerance for positions, segment parameters and parallel tests.
/// Two positions closer than this on every axis are the same lattice point.
pub const EPSILON: f64 = 1e-4;

/// Integer key of a position snapped to the `EPSILON` grid.
pub type PointKey = (i64, i64, i64);

/// Rounds each coordinate to the `EPSILON` grid.
///
/// Two points within `EPSILON` of each other differ by at most one step per
/// axis in key space, so a lookup only has to probe the 27 neighbouring keys.
pub fn quantize(p: &Point3) -> PointKey {
    let scale = 1.0 / EPSILON;
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

/// Keys of the 3x3x3 block around `key` (the key itself first)
pub fn neighbour_keys(key: PointKey) -> impl Iterator<Item = PointKey> {
    const OFFSETS: [i64; 3] = [0, -1, 1];
    OFFSETS.into_iter().flat_map(move |dx| {
        OFFSETS.into_iter().flat_map(move |dy| {
            OFFSETS
                .into_iter()
                .map(move |dz| (key.0 + dx, key.1 + dy, key.2 + dz))
        })
    })
}

/// Per-axis tolerance equality used for point identity
pub fn same_point(a: &Point3, b: &Point3) -> bool {
    (a - b).amax() < EPSILON
}

/// Calculates distance between two points
pub fn calculate_distance(p1: &Point3, p2: &Point3) -> f64 {
    (p1 - p2).norm()
}

/// Calculates angle P1-P2-P3 in degrees
pub fn calculate_angle(p1: &Point3, center: &Point3, p3: &Point3) -> f64 {
    let v1 = normalize(&(p1 - center));
    let v2 = normalize(&(p3 - center));
    v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle between two direction vectors in degrees
pub fn angle_between(u: &Point3, v: &Point3) -> f64 {
    calculate_angle(u, &Point3::zeros(), v)
}

/// Unit vector, or zero for a zero-length input
pub fn normalize(a: &Point3) -> Point3 {
    let l = a.norm();
    if l == 0.0 { Point3::zeros() } else { a / l }
}

pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::zeros();
    }
    points.iter().fold(Point3::zeros(), |acc, p| acc + p) / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_snaps_to_grid() {
        let a = Point3::new(1.0, 0.5, -0.25);
        let b = Point3::new(1.0 + 2e-5, 0.5 - 3e-5, -0.25);
        assert_eq!(quantize(&a), quantize(&b));
        assert_eq!(quantize(&a), (10000, 5000, -2500));
    }

    #[test]
    fn test_neighbour_keys_cover_block() {
        let keys: Vec<_> = neighbour_keys((0, 0, 0)).collect();
        assert_eq!(keys.len(), 27);
        assert_eq!(keys[0], (0, 0, 0));
        assert!(keys.contains(&(-1, 1, -1)));
    }

    #[test]
    fn test_points_straddling_a_rounding_boundary() {
        // 0.6 rounds up, 0.4 rounds down: different keys, same point
        let a = Point3::new(0.00006, 0.0, 0.0);
        let b = Point3::new(0.00004, 0.0, 0.0);
        assert_ne!(quantize(&a), quantize(&b));
        assert!(same_point(&a, &b));
        assert!(neighbour_keys(quantize(&a)).any(|k| k == quantize(&b)));
    }

    #[test]
    fn test_angle() {
        let x = Point3::new(2.0, 0.0, 0.0);
        let y = Point3::new(0.0, 3.0, 0.0);
        assert!((angle_between(&x, &y) - 90.0).abs() < 1e-10);
        assert!((calculate_distance(&x, &y) - 13f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), Point3::new(1.0, 3.0, 0.0)];
        let c = centroid(&pts);
        assert!((c - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(centroid(&[]), Point3::zeros());
    }
}
