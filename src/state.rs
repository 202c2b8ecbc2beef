// src/state.rs
use crate::config::Config;
use crate::error::LatticeError;
use crate::model::GenerationResult;
use crate::physics::Engine;
use log::{debug, info};

/// Owns the configuration and the geometry of the last successful pass.
/// Consumers borrow `current()` read-only until the next `regenerate`.
pub struct AppState {
    pub config: Config,
    current: Option<GenerationResult>,
    /// Parameter adjustments made by the last pass (Nudge policy)
    pub adjustments: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            current: None,
            adjustments: Vec::new(),
        }
    }

    pub fn load_config(&mut self) {
        self.config = Config::load();
    }

    pub fn current(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    /// Runs one full pass and replaces the previous geometry wholesale.
    /// On error the previous geometry stays in place.
    pub fn regenerate(&mut self) -> Result<&GenerationResult, LatticeError> {
        let cfg = &self.config;
        let (engine, notes) = Engine::with_policy(cfg.system, cfg.params, cfg.constraint_policy)?;
        let mut result = engine.run(&cfg.planes)?;
        result.faces.retain(|f| cfg.show_faces.is_visible(&f.index));

        debug!(
            "Regenerated {}: {} points, {} bonds, {} faces, {} planes",
            result.system,
            result.points.len(),
            result.bonds.len(),
            result.faces.len(),
            result.planes.len()
        );
        if !notes.is_empty() {
            info!("{} parameter(s) nudged to satisfy {} constraints", notes.len(), result.system);
        }

        self.adjustments = notes;
        let current: &GenerationResult = self.current.insert(result);
        Ok(current)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
