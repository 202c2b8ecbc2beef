// src/utils/report.rs

use crate::model::structure::{GenerationResult, PointKind};
use crate::physics::basis;
use crate::utils::geometry;
use std::collections::BTreeMap;

/// Text summary of one generation pass
pub fn generation_summary(result: &GenerationResult) -> String {
    let p = &result.params;
    let b = &result.basis;

    let mut out = String::new();
    out.push_str(&format!("System: {}\n", result.system));
    out.push_str(&format!(
        "Cell: a={:.4} b={:.4} c={:.4}  alpha={:.2} beta={:.2} gamma={:.2}  ({}x{}x{})\n",
        p.a, p.b, p.c, p.alpha, p.beta, p.gamma, p.nx, p.ny, p.nz
    ));
    out.push_str(&format!(
        "Basis angles: {:.2} {:.2} {:.2}   Volume: {:.5}\n",
        geometry::angle_between(&b.a2, &b.a3),
        geometry::angle_between(&b.a1, &b.a3),
        geometry::angle_between(&b.a1, &b.a2),
        b.volume()
    ));
    let dirs: Vec<String> = basis::crystal_axes(b)
        .iter()
        .map(|d| format!("[{:.3} {:.3} {:.3}]", d.x, d.y, d.z))
        .collect();
    out.push_str(&format!("Axis directions: {}\n", dirs.join(" ")));

    // Point census by kind
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for point in &result.points {
        *counts.entry(kind_name(point.kind)).or_insert(0) += 1;
    }
    let census: Vec<String> = counts.iter().map(|(k, n)| format!("{} {}", n, k)).collect();
    out.push_str(&format!(
        "Points: {} ({})   Bonds: {}\n",
        result.points.len(),
        census.join(", "),
        result.bonds.len()
    ));

    let lengths: Vec<f64> = result
        .bond_segments()
        .map(|(p, q)| geometry::calculate_distance(&p, &q))
        .collect();
    if !lengths.is_empty() {
        let min = lengths.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = lengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        out.push_str(&format!("Bond lengths: {:.4} to {:.4}\n", min, max));
    }

    out.push_str("------------------------------------------------------------------------------\n");
    out.push_str(&format!(
        "{:<8} {:<14} {:<10} {:<10} {:<10} {:<24}\n",
        "Index", "Kind", "X", "Y", "Z", "Fractional"
    ));
    out.push_str("------------------------------------------------------------------------------\n");

    for point in result.points.iter().take(20) {
        let frac = match b.cart_to_frac(&point.position) {
            Some(f) => format!("{:.3} {:.3} {:.3}", f.x, f.y, f.z),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<8} {:<14} {:<10.4} {:<10.4} {:<10.4} {:<24}\n",
            point.id,
            kind_name(point.kind),
            point.position.x,
            point.position.y,
            point.position.z,
            frac
        ));
    }

    if result.points.len() > 20 {
        out.push_str(&format!("... and {} more points.\n", result.points.len() - 20));
    }

    if !result.faces.is_empty() {
        out.push_str("\nFaces:\n");
        for face in &result.faces {
            out.push_str(&format!(
                "  {:<12} {} vertices, area {:.5}\n",
                face.index.to_string(),
                face.polygon.len(),
                face.polygon.area()
            ));
        }
    }

    if !result.planes.is_empty() {
        out.push_str("\nPlanes:\n");
        for plane in &result.planes {
            match &plane.polygon {
                Some(poly) => out.push_str(&format!(
                    "  {:<12} {} vertices, area {:.5}, {} intercept(s)\n",
                    plane.index.to_string(),
                    poly.len(),
                    poly.area(),
                    plane.intercepts.len()
                )),
                None => out.push_str(&format!(
                    "  {:<12} does not cut the cell\n",
                    plane.index.to_string()
                )),
            }
        }
    }

    out
}

fn kind_name(kind: PointKind) -> &'static str {
    match kind {
        PointKind::Corner => "corner",
        PointKind::BodyCenter => "body-center",
        PointKind::BaseCenter => "base-center",
        PointKind::HexVertex => "hex-vertex",
        PointKind::HexCenter => "hex-center",
        PointKind::Interstitial => "interstitial",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellFamily, LatticeParameters, LatticeSystem, MillerIndex};
    use crate::physics::Engine;

    #[test]
    fn test_summary_mentions_everything() {
        let params = LatticeParameters::cubic(1.0).with_cells(3, 3, 3);
        let engine = Engine::new(LatticeSystem::BodyCentered(CellFamily::Cubic), params).unwrap();
        let result = engine
            .run(&[MillerIndex::new(1, 1, 1), MillerIndex::new(-1, -1, -1)])
            .unwrap();
        let text = generation_summary(&result);

        assert!(text.contains("System: body-centered cubic"));
        assert!(text.contains("Points: 91 (27 body-center, 64 corner)"));
        assert!(text.contains("... and 71 more points."));
        assert!(text.contains("(100)"));
        assert!(text.contains("does not cut the cell"));
        assert!(text.contains("Basis angles: 90.00 90.00 90.00"));
        assert!(text.contains("Axis directions: [1.000 0.000 0.000] [0.000 1.000 0.000] [0.000 0.000 1.000]"));
    }

    #[test]
    fn test_fractional_columns_follow_the_basis() {
        let params = LatticeParameters::cubic(2.0);
        let result = Engine::new(LatticeSystem::BodyCentered(CellFamily::Cubic), params)
            .unwrap()
            .run(&[])
            .unwrap();
        let text = generation_summary(&result);

        let center = text
            .lines()
            .find(|l| l.split_whitespace().nth(1) == Some("body-center"))
            .unwrap();
        assert!(center.contains("1.0000"));
        assert!(center.trim_end().ends_with("0.500 0.500 0.500"));
    }
}
