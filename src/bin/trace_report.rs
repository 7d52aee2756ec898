use pixel_tracer::config::load_config;
use pixel_tracer::convert::{Conversion, Converter};
use pixel_tracer::image::io::{load_rgba_image, write_json_file};
use pixel_tracer::svg::render_document;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let raster = load_rgba_image(&config.input_path)?;
    let converter = Converter::new(config.params.clone());
    let conversion = converter
        .convert_with_diagnostics(&raster)
        .map_err(|e| format!("Conversion failed: {e}"))?;

    print_text_summary(&conversion);

    if let Some(path) = &config.output.svg_out {
        let svg = render_document(&conversion);
        svg.save_to_path(path, config.output.pretty)?;
        println!("SVG written to {}", path.display());
    }

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &conversion.report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(conversion: &Conversion) {
    let stats = &conversion.report.stats;
    let timings = &conversion.report.timings;
    println!("Conversion summary");
    println!("  input: {}x{}", conversion.width, conversion.height);
    println!("  blobs: {}", stats.blobs);
    println!("  shapes: {}", stats.shapes);
    println!("  skipped transparent: {}", stats.skipped_transparent);
    println!("  distinct colors: {}", stats.colors);
    let vertices: usize = conversion
        .shapes
        .iter_shapes()
        .map(|s| s.contours.outer.len() + s.contours.holes.iter().map(Vec::len).sum::<usize>())
        .sum();
    println!("  polygon vertices: {vertices}");
    println!("  total_ms: {:.3}", timings.total_ms);
    for stage in &timings.stages {
        println!("    {}: {:.3} ms", stage.name, stage.elapsed_ms);
    }
}

fn usage() -> String {
    "Usage: trace_report <config.json>\n\
     Config shape: { \"input_path\": ..., \"output\": { \"svg_out\", \"report_json\", \"pretty\" }, \"params\": { ... } }"
        .to_string()
}
