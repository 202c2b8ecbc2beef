// src/lib.rs
//! Crystal lattice and Miller plane geometry.
//!
//! The engine turns lattice parameters into points, bonds, cell faces and
//! ordered Miller plane polygons. Everything else (config, exporters, the
//! CLI) sits on top of [`physics::Engine`].

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod state;
pub mod utils;

pub use error::{Error, LatticeError, Result};
pub use model::{
    BaseFace, Bond, CellFamily, ConstraintPolicy, GenerationResult, LatticeParameters,
    LatticePoint, LatticeSystem, MillerIndex, NamedFace, PlanePolygon, PointKind,
};
pub use physics::engine::{compute_faces, compute_plane, generate};
pub use physics::{Basis, Engine};
pub use state::AppState;
