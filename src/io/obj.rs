// src/io/obj.rs
// Wavefront OBJ: lattice points + bonds as line elements, one object per
// cell face and requested plane (double-sided fan meshes).

use crate::model::{GenerationResult, PlanePolygon};
use crate::rendering::PlaneMesh;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Running 1-based vertex/normal offsets across objects
#[derive(Default)]
struct Cursor {
    v: usize,
    vn: usize,
}

fn write_mesh<W: Write>(w: &mut W, name: &str, polygon: &PlanePolygon, cur: &mut Cursor) -> io::Result<()> {
    let Some(mesh) = PlaneMesh::from_polygon(polygon) else {
        return Ok(());
    };
    writeln!(w, "o {}", name)?;
    writeln!(w, "# area {:.6}", mesh.front_area())?;
    for v in &mesh.vertices {
        writeln!(w, "v {:.8} {:.8} {:.8}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {:.8} {:.8} {:.8}", n.x, n.y, n.z)?;
    }
    for t in &mesh.triangles {
        let [a, b, c] = t.map(|i| (cur.v + i + 1, cur.vn + i + 1));
        writeln!(w, "f {}//{} {}//{} {}//{}", a.0, a.1, b.0, b.1, c.0, c.1)?;
    }
    cur.v += mesh.vertices.len();
    cur.vn += mesh.normals.len();
    Ok(())
}

/// ASCII-only object name for an index, e.g. face_1_0_0 / plane_1_0_-1_0
fn object_name(prefix: &str, components: &[i32]) -> String {
    let parts: Vec<String> = components.iter().map(|c| c.to_string()).collect();
    format!("{}_{}", prefix, parts.join("_"))
}

pub fn write_to<W: Write>(mut w: W, result: &GenerationResult) -> io::Result<()> {
    writeln!(w, "# latview export: {}", result.system)?;
    let mut cur = Cursor::default();

    // 1. Lattice points and bonds
    writeln!(w, "o lattice")?;
    for p in &result.points {
        writeln!(w, "v {:.8} {:.8} {:.8}", p.position.x, p.position.y, p.position.z)?;
    }
    for bond in &result.bonds {
        writeln!(w, "l {} {}", bond.a + 1, bond.b + 1)?;
    }
    cur.v += result.points.len();

    // 2. Cell faces
    for face in &result.faces {
        write_mesh(&mut w, &object_name("face", &face.index.components()), &face.polygon, &mut cur)?;
    }

    // 3. Requested planes
    for plane in &result.planes {
        if let Some(polygon) = &plane.polygon {
            write_mesh(&mut w, &object_name("plane", &plane.index.components()), polygon, &mut cur)?;
        }
    }
    Ok(())
}

pub fn write(path: &str, result: &GenerationResult) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_to(&mut w, result)?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatticeParameters, LatticeSystem, MillerIndex};
    use crate::physics::Engine;

    fn export(planes: &[MillerIndex]) -> String {
        let engine = Engine::new(LatticeSystem::Cubic, LatticeParameters::cubic(1.0)).unwrap();
        let result = engine.run(planes).unwrap();
        let mut buf = Vec::new();
        write_to(&mut buf, &result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_obj_counts() {
        let text = export(&[MillerIndex::new(1, 1, 1)]);
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();

        // 8 points, 6 quads and one triangle, each doubled
        assert_eq!(count("v "), 8 + 6 * 8 + 6);
        assert_eq!(count("vn "), 6 * 8 + 6);
        assert_eq!(count("l "), 12);
        assert_eq!(count("f "), 6 * 4 + 2);
        assert!(text.contains("o face_-1_0_0"));
        assert!(text.contains("o plane_1_1_1"));
    }

    #[test]
    fn test_obj_area_comments() {
        let text = export(&[MillerIndex::new(1, 1, 1)]);
        assert_eq!(text.lines().filter(|l| *l == "# area 1.000000").count(), 6);
        // Equilateral triangle with side sqrt(2)
        assert!(text.contains("o plane_1_1_1\n# area 0.866025\n"));
    }

    #[test]
    fn test_obj_indices_are_in_range() {
        let text = export(&[MillerIndex::new(1, 1, 0)]);
        let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for token in line.split_whitespace().skip(1) {
                let v: usize = token.split("//").next().unwrap().parse().unwrap();
                assert!(v >= 1 && v <= vertices);
            }
        }
        // First face mesh starts right after the 8 lattice points
        let first_face = text.lines().find(|l| l.starts_with("f ")).unwrap();
        assert_eq!(first_face, "f 9//1 10//2 11//3");
    }
}
