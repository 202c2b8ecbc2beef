//src/model/mod.rs
pub mod lattice;
pub mod miller;
pub mod presets;
pub mod structure;

// Re-exports for cleaner imports
pub use lattice::{BaseFace, CellFamily, ConstraintPolicy, LatticeParameters, LatticeSystem};
pub use miller::{FaceFilter, MillerIndex};
pub use structure::{Bond, GenerationResult, LatticePoint, NamedFace, PlanePolygon, PlaneResult, PointKind};
