// src/physics/operations/bonds.rs

use crate::model::lattice::Motif;
use crate::model::structure::{Bond, PointKind};
use crate::physics::basis::Basis;
use crate::physics::operations::supercell::PointSet;
use crate::utils::geometry::Point3;
use std::collections::HashSet;

/// Nearest-neighbour steps for a motif.
/// Parallelepipeds step along the cell edges; hexagonal prisms along the
/// three in-plane directions of length a (0°, 60°, 120°) and along c.
pub fn bond_steps(basis: &Basis, motif: Motif) -> Vec<Point3> {
    if motif.is_hexagonal() {
        vec![basis.a1, basis.a1 + basis.a2, basis.a2, basis.a3]
    } else {
        vec![basis.a1, basis.a2, basis.a3]
    }
}

/// Connects every point p to p ± s for each step s when that neighbour exists.
///
/// Points whose kind is in `excluded` never bond. Output keeps discovery
/// order and holds each undirected pair once.
pub fn generate_bonds(points: &PointSet, steps: &[Point3], excluded: &[PointKind]) -> Vec<Bond> {
    let mut seen = HashSet::new();
    let mut bonds = Vec::new();

    let bondable = |id: usize| !excluded.contains(&points.points()[id].kind);

    for p in points.points() {
        if !bondable(p.id) {
            continue;
        }
        for s in steps {
            for target in [p.position + s, p.position - s] {
                let Some(q) = points.find(&target) else { continue };
                if !bondable(q) {
                    continue;
                }
                if let Some(bond) = Bond::new(p.id, q) {
                    if seen.insert(bond) {
                        bonds.push(bond);
                    }
                }
            }
        }
    }

    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::basis::{build_basis, hexagonal_basis};
    use crate::physics::operations::supercell::generate_points;

    #[test]
    fn test_unit_cube_has_twelve_edges() {
        let basis = build_basis(1.0, 1.0, 1.0, 90.0, 90.0, 90.0).unwrap();
        let points = generate_points(&basis, [1, 1, 1], Motif::Simple);
        let bonds = generate_bonds(&points, &bond_steps(&basis, Motif::Simple), &[]);
        assert_eq!(bonds.len(), 12);
        for bond in &bonds {
            assert!(bond.a < bond.b);
            let d = points.points()[bond.a].position - points.points()[bond.b].position;
            assert!((d.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_grid_edge_count() {
        // 3·n·(n+1)² edges in an n³ block
        let basis = build_basis(1.0, 1.5, 2.0, 90.0, 90.0, 90.0).unwrap();
        let points = generate_points(&basis, [2, 2, 2], Motif::Simple);
        let bonds = generate_bonds(&points, &bond_steps(&basis, Motif::Simple), &[]);
        assert_eq!(bonds.len(), 3 * 2 * 9);
    }

    #[test]
    fn test_body_centers_are_not_bonded() {
        let basis = build_basis(1.0, 1.0, 1.0, 90.0, 90.0, 90.0).unwrap();
        let points = generate_points(&basis, [2, 2, 2], Motif::BodyCentered);
        let steps = bond_steps(&basis, Motif::BodyCentered);

        let bonds = generate_bonds(&points, &steps, &[PointKind::BodyCenter]);
        assert_eq!(bonds.len(), 54);
        assert!(bonds.iter().all(|b| {
            points.points()[b.a].kind == PointKind::Corner && points.points()[b.b].kind == PointKind::Corner
        }));

        // Without the exclusion, centres of neighbouring cells are one a1 apart
        let with_centers = generate_bonds(&points, &steps, &[]);
        assert_eq!(with_centers.len(), 54 + 12);
    }

    #[test]
    fn test_hexagonal_bonds() {
        let basis = hexagonal_basis(1.0, 1.633).unwrap();

        let motif = Motif::HexagonalPrism;
        let points = generate_points(&basis, [1, 1, 1], motif);
        let bonds = generate_bonds(&points, &bond_steps(&basis, motif), &[]);
        // 2 rings of 6, 7 verticals, 2 sets of 6 spokes
        assert_eq!(bonds.len(), 31);

        let motif = Motif::HexagonalClosePacked;
        let points = generate_points(&basis, [1, 1, 1], motif);
        let bonds = generate_bonds(&points, &bond_steps(&basis, motif), &[PointKind::HexCenter]);
        // 2 rings, 6 verticals, the interstitial triangle
        assert_eq!(bonds.len(), 21);
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let basis = build_basis(1.0, 1.2, 0.9, 87.0, 84.0, 69.0).unwrap();
        let points = generate_points(&basis, [2, 1, 2], Motif::Simple);
        let bonds = generate_bonds(&points, &bond_steps(&basis, Motif::Simple), &[]);
        let unique: HashSet<_> = bonds.iter().collect();
        assert_eq!(unique.len(), bonds.len());
    }
}
