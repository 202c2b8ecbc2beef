use crate::model::GenerationResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extended XYZ: one line per lattice point, labelled by its kind.
/// The comment line carries the replicated cell as `Lattice="..."`.
pub fn write_to<W: Write>(mut w: W, result: &GenerationResult) -> io::Result<()> {
    // 1. Number of points
    writeln!(w, "{}", result.points.len())?;

    // 2. Comment line: block edges, row by row
    let cell = result.basis.scaled(result.params.counts());
    let lattice: Vec<String> = cell
        .axes()
        .iter()
        .flat_map(|v| [v.x, v.y, v.z])
        .map(|x| format!("{:.8}", x))
        .collect();
    writeln!(
        w,
        "Lattice=\"{}\" Properties=species:S:1:pos:R:3 system=\"{}\"",
        lattice.join(" "),
        result.system
    )?;

    // 3. Points
    for p in &result.points {
        writeln!(
            w,
            "{:<4} {:12.8} {:12.8} {:12.8}",
            p.kind.label(),
            p.position.x,
            p.position.y,
            p.position.z
        )?;
    }
    Ok(())
}

pub fn write(path: &str, result: &GenerationResult) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_to(&mut w, result)?;
    w.flush()
}
