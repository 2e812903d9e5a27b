use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use field_boundary::boundary::Boundary;
use field_boundary::{display, read_polygon, reference, svg};
use walkdir::WalkDir;

/// Centroid and area of drawn field boundaries.
#[derive(Parser)]
struct Cli {
    /// GeoJSON, KML, GPX or drawn-points JSON files; directories are walked.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write one SVG preview per ring into this directory.
    #[arg(long, env = "FIELD_BOUNDARY_SVG_DIR")]
    svg_dir: Option<PathBuf>,

    /// Print the storage document of every ring as JSON.
    #[arg(long)]
    json: bool,

    /// Also print the geodesic area from the geo crate.
    #[arg(long)]
    reference: bool,
}

fn input_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                match entry {
                    Ok(e) if e.file_type().is_file() && read_polygon::is_supported(e.path()) => {
                        files.push(e.into_path())
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("skipping: {}", e),
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn write_svg(dir: &Path, name: &str, boundary: &Boundary) -> Result<()> {
    let Some(bbox) = boundary.ring().bbox() else {
        return Ok(());
    };
    let mut svg = svg::SVG::init(&bbox);
    svg.add_ring(boundary.ring(), "none");
    svg.add_marker(&boundary.metrics().centroid());
    let path = dir.join(format!("{}.svg", name));
    std::fs::write(&path, svg.render())
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    if let Some(dir) = &args.svg_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let (inputs, unreadable) = read_polygon::read_all(&input_files(&args.paths));
    let mut rejected = 0usize;
    for (file, rings) in inputs {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ring".to_string());
        for (i, ring) in rings.into_iter().enumerate() {
            let name = format!("{}-{}", stem, i);
            let reference_area = args.reference.then(|| reference::geodesic_area_hectares(&ring));
            let boundary = match Boundary::new(ring) {
                Ok(b) => b,
                Err(e) => {
                    log::error!("{}: {}", name, e);
                    rejected += 1;
                    continue;
                }
            };
            let m = boundary.metrics();
            println!("{}", name);
            println!("  centroid: {:.6}, {:.6}", m.centroid_lat, m.centroid_lon);
            println!(
                "      area: {} ({:.4} ha)",
                display::format_area(m.area_hectares),
                m.area_hectares
            );
            if let Some(geodesic) = reference_area {
                println!(" geodesic: {:.4} ha (geo crate)", geodesic);
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&boundary.storage_document())?);
            }
            if let Some(dir) = &args.svg_dir {
                write_svg(dir, &name, &boundary)?;
            }
        }
    }

    if unreadable > 0 {
        log::warn!("{} file(s) could not be read", unreadable);
    }
    if rejected > 0 {
        log::warn!("{} ring(s) rejected, redraw them", rejected);
    }
    Ok(())
}
