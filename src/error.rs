// src/error.rs

use thiserror::Error;

/// Rejections raised by the geometry engine.
///
/// Every variant comes from user-supplied parameters or indices, so callers
/// are expected to clamp, reset or report them rather than abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
  #[error("Degenerate cell: {0}")]
  DegenerateCell(String),

  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  #[error("{system} constraint violated: {reason}")]
  ConstraintViolation { system: String, reason: String },

  #[error("{0} does not define a plane")]
  NotAPlane(String),

  #[error("Miller-Bravais index ({h}, {k}, {i}, l) violates h + k + i = 0")]
  InvalidBravaisIndex { h: i32, k: i32, i: i32 },

  #[error("Miller index component {value} outside [{min}, {max}]")]
  IndexOutOfRange { value: i32, min: i32, max: i32 },
}

/// Application-level error (CLI, config, exporters)
#[derive(Error, Debug)]
pub enum Error {
  #[error(transparent)]
  Lattice(#[from] LatticeError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Usage: {0}")]
  Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
