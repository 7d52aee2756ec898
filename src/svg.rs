//! SVG document writer for traced polygon shapes.
//!
//! Geometry is written verbatim from the pixel-edge lattice: the viewBox
//! spans `0 0 w h`, so the document rasterizes back to the source grid.
//! Holes become additional subpaths in their opposite winding, which makes
//! even-odd and nonzero fill rules agree on subtracting them.
//!
//! Element ids are deterministic so shapes can be addressed from scripts and
//! stylesheets: a color id `x{hex}_r{r}_g{g}_b{b}` (plus `_a{opacity}` when
//! the source raster carries translucency), extended per shape with a
//! running index.
use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::contour::Point;
use crate::convert::{Conversion, Shape, ShapeSet};
use crate::image::io::ensure_parent_dir;

/// A rendered SVG image, ready to serialize.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    pub width: usize,
    pub height: usize,
    nodes: Vec<Node>,
}

#[derive(Clone, Debug)]
enum Node {
    Group { id: String, paths: Vec<PathNode> },
    Path(PathNode),
}

#[derive(Clone, Debug)]
struct PathNode {
    id: String,
    data: String,
    fill: String,
    opacity: f64,
}

/// Render a conversion result into an SVG document.
pub fn render_document(conversion: &Conversion) -> SvgDocument {
    let has_opacity = conversion.has_opacity;
    let nodes = match &conversion.shapes {
        ShapeSet::Grouped(groups) => groups
            .iter()
            .map(|group| {
                let color_id = color_id(group.color, has_opacity);
                let paths = group
                    .shapes
                    .iter()
                    .enumerate()
                    .map(|(i, shape)| path_node(shape, format!("{color_id}_shape{}", i + 1)))
                    .collect();
                Node::Group {
                    id: color_id,
                    paths,
                }
            })
            .collect(),
        ShapeSet::Flat(shapes) => shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let color_id = color_id(shape.color, has_opacity);
                Node::Path(path_node(shape, format!("shape{}_{color_id}", i + 1)))
            })
            .collect(),
    };

    SvgDocument {
        width: conversion.width,
        height: conversion.height,
        nodes,
    }
}

impl SvgDocument {
    /// Serialize the document; `pretty` indents one element per line.
    pub fn to_string(&self, pretty: bool) -> String {
        let mut out = String::new();
        let nl = if pretty { "\n" } else { "" };

        out.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        out.push_str(nl);
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        out.push_str(nl);

        for node in &self.nodes {
            match node {
                Node::Group { id, paths } => {
                    if pretty {
                        out.push_str("  ");
                    }
                    out.push_str(&format!(r#"<g id="{id}">"#));
                    out.push_str(nl);
                    for path in paths {
                        write_path(&mut out, path, pretty, 2);
                    }
                    if pretty {
                        out.push_str("  ");
                    }
                    out.push_str("</g>");
                    out.push_str(nl);
                }
                Node::Path(path) => write_path(&mut out, path, pretty, 1),
            }
        }

        out.push_str("</svg>");
        out.push_str(nl);
        out
    }

    /// Write the document to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path, pretty: bool) -> Result<(), String> {
        ensure_parent_dir(path)?;
        fs::write(path, self.to_string(pretty))
            .map_err(|e| format!("Failed to write SVG {}: {e}", path.display()))
    }
}

fn write_path(out: &mut String, path: &PathNode, pretty: bool, depth: usize) {
    if pretty {
        for _ in 0..depth {
            out.push_str("  ");
        }
    }
    out.push_str(&format!(
        r#"<path id="{}" d="{}" fill="{}" fill-opacity="{}" />"#,
        path.id, path.data, path.fill, path.opacity
    ));
    if pretty {
        out.push('\n');
    }
}

fn path_node(shape: &Shape, id: String) -> PathNode {
    PathNode {
        id,
        data: path_data(shape),
        fill: shape.color.to_hex(),
        opacity: shape.color.a as f64 / 255.0,
    }
}

/// `M x,y x,y … z` for the outer loop, repeated per hole subpath.
fn path_data(shape: &Shape) -> String {
    let mut parts = vec![polygon_data(&shape.contours.outer)];
    for hole in &shape.contours.holes {
        parts.push(polygon_data(hole));
    }
    parts.join(" ")
}

fn polygon_data(points: &[Point]) -> String {
    let coords: Vec<String> = points.iter().map(|&(x, y)| format!("{x},{y}")).collect();
    format!("M {} z", coords.join(" "))
}

/// Deterministic id for one color, shared by all its shapes.
fn color_id(color: Rgba, has_opacity: bool) -> String {
    let hex = &color.to_hex()[1..];
    let mut id = format!(
        "x{hex}_r{}_g{}_b{}",
        color.r, color.g, color.b
    );
    if has_opacity {
        id.push_str(&format!("_a{}", color.a as f64 / 255.0));
    }
    id
}
