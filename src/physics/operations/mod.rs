// src/physics/operations/mod.rs
pub mod bonds;
pub mod supercell;
