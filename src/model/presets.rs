// src/model/presets.rs
// Illustrative axis ratios and angles for teaching, not reference data.

use crate::model::lattice::{BaseFace, CellFamily, LatticeParameters, LatticeSystem};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub system: LatticeSystem,
    pub params: LatticeParameters,
}

/// Ideal c/a of close-packed spheres, sqrt(8/3)
pub const IDEAL_HCP_C_OVER_A: f64 = 1.633;

/// Tetragonal-style cell: b = a, c = ratio·a, right angles
pub fn with_c_over_a(a: f64, ratio: f64) -> LatticeParameters {
    LatticeParameters::new(a, a, a * ratio, 90.0, 90.0, 90.0)
}

/// b = b_over_a·a, c = c_over_a·a with the given angles
pub fn with_axis_ratios(
    a: f64,
    b_over_a: f64,
    c_over_a: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> LatticeParameters {
    LatticeParameters::new(a, a * b_over_a, a * c_over_a, alpha, beta, gamma)
}

fn rhombohedral(angle: f64) -> LatticeParameters {
    LatticeParameters::new(1.0, 1.0, 1.0, angle, angle, angle)
}

pub fn catalogue() -> Vec<Preset> {
    use LatticeSystem::*;

    let bct = BodyCentered(CellFamily::Tetragonal);
    let base_ortho = BaseCentered(CellFamily::Orthorhombic, BaseFace::C);
    let base_mono = BaseCentered(CellFamily::Monoclinic, BaseFace::B);

    let p = |name, system, params| Preset { name, system, params };

    vec![
        // --- Tetragonal (c/a) ---
        p("rutile", Tetragonal, with_c_over_a(1.0, 0.64)),
        p("cassiterite", Tetragonal, with_c_over_a(1.0, 0.67)),
        p("zircon", Tetragonal, with_c_over_a(1.0, 1.24)),
        p("anatase", Tetragonal, with_c_over_a(1.0, 2.51)),
        // --- Body-centered tetragonal (c/a) ---
        p("indium", bct, with_c_over_a(1.0, 1.08)),
        p("beta-tin", bct, with_c_over_a(1.0, 0.55)),
        p("martensite", bct, with_c_over_a(1.0, 1.06)),
        p("fe-si", bct, with_c_over_a(1.0, 1.27)),
        // --- Base-centered orthorhombic (b/a, c/a) ---
        p("stibnite", base_ortho, with_axis_ratios(1.0, 1.31, 0.99, 90.0, 90.0, 90.0)),
        p("bismuthinite", base_ortho, with_axis_ratios(1.0, 1.28, 0.95, 90.0, 90.0, 90.0)),
        p("orpiment", base_ortho, with_axis_ratios(1.0, 0.82, 0.71, 90.0, 90.0, 90.0)),
        // --- Base-centered monoclinic (b/a, c/a, gamma) ---
        p("gypsum", base_mono, with_axis_ratios(1.0, 1.47, 1.13, 90.0, 90.0, 81.0)),
        p("orthoclase", base_mono, with_axis_ratios(1.0, 1.28, 0.84, 90.0, 90.0, 64.0)),
        p("clinopyroxene", base_mono, with_axis_ratios(1.0, 0.90, 0.57, 90.0, 90.0, 72.0)),
        p("biotite", base_mono, with_axis_ratios(1.0, 0.97, 1.02, 90.0, 90.0, 85.0)),
        // --- Triclinic ---
        p("microcline", Triclinic, LatticeParameters::new(1.0, 1.2, 0.9, 87.0, 84.0, 69.0)),
        p("axinite", Triclinic, LatticeParameters::new(1.0, 1.5, 0.8, 82.0, 81.0, 77.0)),
        // --- Rhombohedral (alpha = beta = gamma) ---
        p("calcite", Rhombohedral, rhombohedral(46.0)),
        p("quartz", Rhombohedral, rhombohedral(66.0)),
        p("hematite", Rhombohedral, rhombohedral(55.0)),
        p("corundum", Rhombohedral, rhombohedral(55.0)),
        // --- Hexagonal ---
        p("hcp", HexagonalClosePacked, LatticeParameters::hexagonal(1.0, IDEAL_HCP_C_OVER_A)),
    ]
}

/// Case-insensitive lookup by name
pub fn find(name: &str) -> Option<Preset> {
    let key = name.trim().to_lowercase();
    catalogue().into_iter().find(|p| p.name == key)
}
