// src/io/mod.rs
pub mod json;
pub mod obj;
pub mod xyz;

use crate::config::{ExportFormat, RenderStyle};
use crate::error::Result;
use crate::model::GenerationResult;
use log::info;

/// Picks the exporter from the file extension, falling back to `default`
pub fn format_for_path(path: &str, default: ExportFormat) -> ExportFormat {
    let p = path.to_lowercase();

    if p.ends_with(".json") {
        ExportFormat::Json
    } else if p.ends_with(".xyz") || p.ends_with(".extxyz") {
        ExportFormat::Xyz
    } else if p.ends_with(".obj") {
        ExportFormat::Obj
    } else {
        default
    }
}

pub fn save_geometry(
    path: &str,
    result: &GenerationResult,
    style: &RenderStyle,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Json => json::write(path, result, style)?,
        ExportFormat::Xyz => xyz::write(path, result)?,
        ExportFormat::Obj => obj::write(path, result)?,
    }
    info!("Exported {:?} geometry to {}", format, path);
    Ok(())
}
