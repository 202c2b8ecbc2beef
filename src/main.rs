// src/main.rs
//! Command-line front end: build one lattice, print the report, export it.
//!
//! Usage:
//!   latview [--preset NAME] [--system NAME] [-a A -b B -c C] [--cells NX NY NZ]
//!           [--plane H K L]... [--bravais H K L]... [--format json|xyz|obj]
//!           [--output PATH]

use latview::config::{Config, ExportFormat};
use latview::error::{Error, Result};
use latview::model::{presets, ConstraintPolicy, LatticeSystem, MillerIndex};
use latview::utils::{logger, report};
use latview::{io, AppState};
use log::LevelFilter;
use std::env;
use std::process;

#[derive(Debug, Default)]
struct CliOptions {
    preset: Option<String>,
    system: Option<LatticeSystem>,
    lengths: [Option<f64>; 3],
    angles: [Option<f64>; 3],
    cells: Option<(u32, u32, u32)>,
    planes: Vec<MillerIndex>,
    nudge: bool,
    format: Option<ExportFormat>,
    output: Option<String>,
    list_presets: bool,
    save_config: bool,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(2);
        }
    };

    let level = if opts.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = logger::init(level) {
        eprintln!("Logger already initialised: {}", e);
    }

    if let Err(e) = run(opts) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(opts: CliOptions) -> Result<()> {
    if opts.list_presets {
        for preset in presets::catalogue() {
            let p = preset.params;
            println!(
                "{:<14} {:<34} a={:.3} b={:.3} c={:.3}  {:.1} {:.1} {:.1}",
                preset.name,
                preset.system.to_string(),
                p.a,
                p.b,
                p.c,
                p.alpha,
                p.beta,
                p.gamma
            );
        }
        return Ok(());
    }

    let mut state = AppState::new();
    state.load_config();
    apply_options(&mut state.config, &opts)?;

    if opts.save_config {
        let path = state.config.save()?;
        println!("Saved configuration to {}", path.display());
    }

    let result = state.regenerate()?;
    print!("{}", report::generation_summary(result));

    if !state.adjustments.is_empty() {
        println!("\nAdjusted parameters:");
        for note in &state.adjustments {
            println!("  {}", note);
        }
    }

    if let Some(path) = &opts.output {
        let format = opts
            .format
            .unwrap_or_else(|| io::format_for_path(path, state.config.export_format));
        if let Some(result) = state.current() {
            io::save_geometry(path, result, &state.config.style, format)?;
            println!("\nWrote {:?} to {}", format, path);
        }
    }

    Ok(())
}

/// Layers the command line over the loaded configuration
fn apply_options(cfg: &mut Config, opts: &CliOptions) -> Result<()> {
    if let Some(name) = &opts.preset {
        let preset = presets::find(name)
            .ok_or_else(|| Error::Usage(format!("unknown preset '{}' (see --list-presets)", name)))?;
        cfg.system = preset.system;
        cfg.params = preset.params;
    }
    if let Some(system) = opts.system {
        cfg.system = system;
    }

    let p = &mut cfg.params;
    let [a, b, c] = opts.lengths;
    let [alpha, beta, gamma] = opts.angles;
    p.a = a.unwrap_or(p.a);
    p.b = b.unwrap_or(p.b);
    p.c = c.unwrap_or(p.c);
    p.alpha = alpha.unwrap_or(p.alpha);
    p.beta = beta.unwrap_or(p.beta);
    p.gamma = gamma.unwrap_or(p.gamma);
    if let Some((nx, ny, nz)) = opts.cells {
        *p = p.with_cells(nx, ny, nz);
    }

    if !opts.planes.is_empty() {
        cfg.planes = opts.planes.clone();
    }
    if opts.nudge {
        cfg.constraint_policy = ConstraintPolicy::Nudge;
    }
    if let Some(format) = opts.format {
        cfg.export_format = format;
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--preset" => {
                opts.preset = Some(value(args, &mut i)?.to_string());
            }
            "--system" => {
                opts.system = Some(value(args, &mut i)?.parse()?);
            }
            "-a" => opts.lengths[0] = Some(number(args, &mut i)?),
            "-b" => opts.lengths[1] = Some(number(args, &mut i)?),
            "-c" => opts.lengths[2] = Some(number(args, &mut i)?),
            "--alpha" => opts.angles[0] = Some(number(args, &mut i)?),
            "--beta" => opts.angles[1] = Some(number(args, &mut i)?),
            "--gamma" => opts.angles[2] = Some(number(args, &mut i)?),
            "--cells" => {
                let nx = number(args, &mut i)?;
                let ny = number(args, &mut i)?;
                let nz = number(args, &mut i)?;
                opts.cells = Some((nx, ny, nz));
            }
            "--plane" => {
                let mut comps: Vec<i32> = Vec::with_capacity(4);
                while comps.len() < 4 {
                    match args.get(i + 1).and_then(|s| s.parse::<i32>().ok()) {
                        Some(v) => {
                            comps.push(v);
                            i += 1;
                        }
                        None => break,
                    }
                }
                let index = match comps.as_slice() {
                    &[h, k, l] => MillerIndex::new(h, k, l),
                    &[h, k, idx, l] => MillerIndex::bravais(h, k, idx, l),
                    _ => {
                        return Err(Error::Usage(
                            "--plane expects three (hkl) or four (hkil) integers".to_string(),
                        ))
                    }
                };
                opts.planes.push(index);
            }
            "--bravais" => {
                let h = number(args, &mut i)?;
                let k = number(args, &mut i)?;
                let l = number(args, &mut i)?;
                opts.planes.push(MillerIndex::bravais_from_hkl(h, k, l));
            }
            "--nudge" => opts.nudge = true,
            "--format" => {
                opts.format = Some(match value(args, &mut i)?.to_lowercase().as_str() {
                    "json" => ExportFormat::Json,
                    "xyz" => ExportFormat::Xyz,
                    "obj" => ExportFormat::Obj,
                    other => return Err(Error::Usage(format!("unknown format '{}'", other))),
                });
            }
            "--output" | "-o" => {
                opts.output = Some(value(args, &mut i)?.to_string());
            }
            "--list-presets" => opts.list_presets = true,
            "--save-config" => opts.save_config = true,
            "-v" | "--verbose" => opts.verbose = true,
            other => return Err(Error::Usage(format!("unknown option '{}'", other))),
        }
        i += 1;
    }

    Ok(opts)
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| Error::Usage(format!("{} needs a value", flag)))
}

fn number<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T> {
    let flag = args[*i].clone();
    let raw = value(args, i)?;
    raw.parse()
        .map_err(|_| Error::Usage(format!("invalid value '{}' for {}", raw, flag)))
}

fn print_usage() {
    eprintln!("latview - crystal lattice and Miller plane geometry");
    eprintln!();
    eprintln!("Usage: latview [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --system NAME          Lattice system (cubic, bcc, bct, hex, hcp, base-centered-monoclinic, ...)");
    eprintln!("  --preset NAME          Start from a material preset");
    eprintln!("  -a A -b B -c C         Cell lengths");
    eprintln!("  --alpha/--beta/--gamma Cell angles in degrees");
    eprintln!("  --cells NX NY NZ       Replication counts (default: 1 1 1)");
    eprintln!("  --plane H K L          Miller plane (repeatable; H K I L for hexagonal)");
    eprintln!("  --bravais H K L        Miller-Bravais plane with i = -(h + k) (repeatable)");
    eprintln!("  --nudge                Adjust parameters to fit the system instead of rejecting");
    eprintln!("  --format FMT           Export format: json, xyz or obj");
    eprintln!("  --output PATH          Write the geometry to PATH");
    eprintln!("  --list-presets         Print the preset catalogue and exit");
    eprintln!("  --save-config          Persist the resulting settings");
    eprintln!("  -v                     Verbose logging");
}
