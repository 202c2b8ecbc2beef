// src/physics/mod.rs
pub mod basis;
pub mod engine;
pub mod miller_math;
pub mod operations;
pub mod polygon;

pub use basis::{build_basis, hexagonal_basis, Basis};
pub use engine::Engine;
