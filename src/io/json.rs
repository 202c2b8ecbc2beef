// src/io/json.rs

use crate::config::RenderStyle;
use crate::error::Result;
use crate::model::GenerationResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Serialize)]
struct Export<'a> {
    generator: &'static str,
    version: &'static str,
    style: &'a RenderStyle,
    #[serde(flatten)]
    result: &'a GenerationResult,
}

pub fn write_to<W: Write>(writer: W, result: &GenerationResult, style: &RenderStyle) -> Result<()> {
    let export = Export {
        generator: "latview",
        version: env!("CARGO_PKG_VERSION"),
        style,
        result,
    };
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

pub fn write(path: &str, result: &GenerationResult, style: &RenderStyle) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, result, style)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatticeParameters, LatticeSystem, MillerIndex};
    use crate::physics::Engine;

    #[test]
    fn test_json_layout() {
        let engine = Engine::new(LatticeSystem::Cubic, LatticeParameters::cubic(1.0)).unwrap();
        let result = engine.run(&[MillerIndex::new(1, 1, 1)]).unwrap();

        let mut buf = Vec::new();
        write_to(&mut buf, &result, &RenderStyle::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["generator"], "latview");
        assert_eq!(value["system"], "Cubic");
        assert_eq!(value["points"].as_array().unwrap().len(), 8);
        assert_eq!(value["bonds"].as_array().unwrap().len(), 12);
        assert_eq!(value["faces"].as_array().unwrap().len(), 6);
        assert_eq!(value["planes"][0]["index"]["Miller"]["h"], 1);
        assert_eq!(value["planes"][0]["polygon"]["vertices"].as_array().unwrap().len(), 3);
        assert!(value["style"]["bond_radius"].is_number());
    }

    #[test]
    fn test_result_reads_back() {
        let engine = Engine::new(LatticeSystem::HexagonalClosePacked, LatticeParameters::hexagonal(1.0, 1.633)).unwrap();
        let result = engine.run(&[MillerIndex::bravais(1, 0, -1, 1)]).unwrap();

        let text = serde_json::to_string(&result).unwrap();
        let back: GenerationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back.points.len(), result.points.len());
        assert_eq!(back.bonds, result.bonds);
        assert_eq!(back.system, LatticeSystem::HexagonalClosePacked);
    }
}
