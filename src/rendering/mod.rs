// src/rendering/mod.rs
pub mod mesh;

pub use mesh::PlaneMesh;
