// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Lattice matrix with the basis vectors as columns
pub fn lattice_matrix(a1: &Vector3<f64>, a2: &Vector3<f64>, a3: &Vector3<f64>) -> Matrix3<f64> {
  Matrix3::from_columns(&[*a1, *a2, *a3])
}

/// Convert fractional coordinates to Cartesian using the column lattice matrix
///
/// # Formula
/// ```text
/// Cartesian = [a1 a2 a3] × Fractional
/// ```
pub fn frac_to_cart(frac: &Vector3<f64>, lattice: &Matrix3<f64>) -> Vector3<f64> {
  lattice * frac
}

/// Convert Cartesian coordinates to fractional using the column lattice matrix
///
/// # Returns
/// Fractional coordinates or None if the lattice is singular
///
/// # Formula
/// ```text
/// Fractional = [a1 a2 a3]^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: &Vector3<f64>, lattice: &Matrix3<f64>) -> Option<Vector3<f64>> {
  let inv_lat = lattice.try_inverse()?;
  Some(inv_lat * cart)
}

/// Signed volume a1 · (a2 × a3)
pub fn triple_product(a1: &Vector3<f64>, a2: &Vector3<f64>, a3: &Vector3<f64>) -> f64 {
  a1.dot(&a2.cross(a3))
}
