// src/config.rs

use crate::model::{ConstraintPolicy, FaceFilter, LatticeParameters, LatticeSystem, MillerIndex};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
  #[default]
  Json,
  Xyz,
  Obj,
}

// --- RenderStyle ---
// Visual options; only passed through to exporters

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
  pub atom_scale: f64,
  pub bond_radius: f64,
  pub atom_color: (f64, f64, f64, f64),
  pub bond_color: (f64, f64, f64, f64),
  pub face_color: (f64, f64, f64, f64),
  pub plane_color: (f64, f64, f64, f64),
}

impl Default for RenderStyle {
  fn default() -> Self {
    Self {
      atom_scale: 0.15,
      bond_radius: 0.03,
      atom_color: (0.2, 0.4, 0.9, 1.0),
      bond_color: (0.5, 0.5, 0.5, 1.0),
      face_color: (0.8, 0.8, 0.8, 0.15),
      plane_color: (0.95, 0.45, 0.1, 0.6),
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub system: LatticeSystem,

  #[serde(default)]
  pub params: LatticeParameters,

  #[serde(default)]
  pub planes: Vec<MillerIndex>,

  #[serde(default)]
  pub show_faces: FaceFilter,

  #[serde(default)]
  pub constraint_policy: ConstraintPolicy,

  #[serde(default)]
  pub export_format: ExportFormat,

  #[serde(default)]
  pub style: RenderStyle,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      system: LatticeSystem::Cubic,
      params: LatticeParameters::default(),
      planes: vec![MillerIndex::new(1, 1, 1)],
      show_faces: FaceFilter::default(),
      constraint_policy: ConstraintPolicy::Reject,
      export_format: ExportFormat::Json,
      style: RenderStyle::default(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/latview/settings.json)
  pub fn load() -> Self {
    Self::load_from(&Self::get_path())
  }

  /// Falls back to defaults on any error
  pub fn load_from(path: &Path) -> Self {
    if !path.exists() {
      info!("No config found. Using defaults.");
      return Self::default();
    }
    match File::open(path) {
      Ok(file) => {
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
          Ok(cfg) => {
            info!("Config loaded from {:?}", path);
            cfg
          }
          Err(e) => {
            warn!("Error parsing config: {}", e);
            Self::default()
          }
        }
      }
      Err(e) => {
        warn!("Error opening config: {}", e);
        Self::default()
      }
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> crate::error::Result<PathBuf> {
    let path = Self::get_path();
    self.save_to(&path)?;
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    info!("Config saved to {:?}", path);
    Ok(())
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "latview", "latview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
