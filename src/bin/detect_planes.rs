use primitive_detector::config::detect;
use primitive_detector::image::io::{load_depth_png, save_label_png, write_json_file};
use primitive_detector::image::DepthGrid;
use primitive_detector::PrimitiveDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect::load_config(Path::new(&config_path))?;

    let depth = load_depth_png(&config.input_path, config.depth_scale)?;
    let grid = DepthGrid::from_depth_map(depth.width, depth.height, &depth.depth, &config.intrinsics)
        .map_err(|e| e.to_string())?;

    let mut detector = PrimitiveDetector::new(config.params.clone()).map_err(|e| e.to_string())?;
    let report = detector
        .process_with_diagnostics(&grid)
        .map_err(|e| e.to_string())?;

    println!("Detection summary");
    println!("{}", report.summary());

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("\nJSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.label_image {
        save_label_png(&report.result.labels, path)?;
        println!("Label image written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: detect_planes <config.json>".to_string()
}
