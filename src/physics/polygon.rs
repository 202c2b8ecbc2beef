// src/physics/polygon.rs

use crate::utils::geometry::{self, Point3};
use std::cmp::Ordering;
use std::f64::consts::TAU;

/// Sorts coplanar points into a cyclic, counter-clockwise sequence about
/// the normal of the first non-collinear triple.
pub fn order_polygon(points: Vec<Point3>) -> Vec<Point3> {
    match leading_normal(&points) {
        Some(normal) => order_polygon_about(points, &normal),
        None => points,
    }
}

/// Same as `order_polygon` but winding counter-clockwise about `normal`
pub fn order_polygon_about(mut points: Vec<Point3>, normal: &Point3) -> Vec<Point3> {
    if points.len() < 3 {
        return points;
    }

    // 1. Centroid
    let center = geometry::centroid(&points);

    // 2. Reference direction: first point not sitting on the centroid
    let Some(reference) = points
        .iter()
        .map(|p| p - center)
        .find(|v| v.norm_squared() > 1e-16)
        .map(|v| v.normalize())
    else {
        return points;
    };

    // 3. Signed angle about the normal, folded into [0, 2π)
    let angle = |p: &Point3| {
        let dir = p - center;
        let mut a = reference.cross(&dir).dot(normal).atan2(reference.dot(&dir));
        if a < 0.0 {
            a += TAU;
        }
        // The reference point itself can round to just below 2π
        if TAU - a < 1e-12 {
            a = 0.0;
        }
        a
    };

    // 4. Sort by angle
    points.sort_by(|a, b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));
    points
}

/// (p1 - p0) × (p2 - p0), searching further triples when the leading
/// points are collinear or repeated.
fn leading_normal(points: &[Point3]) -> Option<Point3> {
    let p0 = points.first()?;
    for i in 1..points.len() {
        for j in (i + 1)..points.len() {
            let n = (points[i] - p0).cross(&(points[j] - p0));
            if n.norm_squared() > 1e-16 {
                return Some(n);
            }
        }
    }
    // p0 itself may be the odd one out: retry from the second point
    if points.len() > 3 {
        return leading_normal(&points[1..]);
    }
    None
}

/// Area as half the sum of p_i × p_(i+1), projected on the polygon normal
pub fn shoelace_area(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = Point3::zeros();
    for i in 0..n {
        acc += points[i].cross(&points[(i + 1) % n]);
    }
    let Some(normal) = leading_normal(points) else {
        return 0.0;
    };
    0.5 * acc.dot(&normal.normalize())
}

/// Sum of the fan triangles (0, i, i + 1)
pub fn fan_area(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let p0 = points[0];
    points
        .windows(2)
        .skip(1)
        .map(|w| 0.5 * (w[0] - p0).cross(&(w[1] - p0)).norm())
        .sum()
}
