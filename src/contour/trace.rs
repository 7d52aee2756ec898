//! Boundary tracing of one blob mask into closed pixel-edge loops.
//!
//! Every true cell contributes one directed segment per side whose opposite
//! cell is false or outside the grid. The directions are chosen so the blob
//! interior stays on the same hand along every segment; the segments of a
//! 4-connected blob then form a disjoint union of simple cycles with
//! in-degree 1 and out-degree 1 at every lattice point.
//!
//! Chaining walks those cycles end-to-start through a start-point index
//! (O(1) lookup per step). A walk that cannot continue before closing its
//! loop signals a malformed mask and fails the conversion with the stuck
//! segment, rather than silently dropping boundary data.
use std::collections::HashMap;

use crate::contour::Point;
use crate::error::Error;
use crate::label::BlobMask;

/// Trace all boundary loops of one blob mask.
///
/// A blob without holes yields one loop; every hole adds another.
pub fn trace_blob(mask: &BlobMask) -> Result<Vec<Vec<Point>>, Error> {
    let segments = emit_segments(mask);
    if segments.is_empty() {
        return Err(Error::EmptyBlob);
    }
    chain_segments(segments)
}

/// Directed boundary segments of every exposed cell side.
fn emit_segments(mask: &BlobMask) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    for y in 0..mask.h {
        for x in 0..mask.w {
            if !mask.get(x, y) {
                continue;
            }
            let (xu, yu) = (x as u32, y as u32);
            if x == 0 || !mask.get(x - 1, y) {
                segments.push(((xu, yu + 1), (xu, yu)));
            }
            if x + 1 == mask.w || !mask.get(x + 1, y) {
                segments.push(((xu + 1, yu), (xu + 1, yu + 1)));
            }
            if y == 0 || !mask.get(x, y - 1) {
                segments.push(((xu, yu), (xu + 1, yu)));
            }
            if y + 1 == mask.h || !mask.get(x, y + 1) {
                segments.push(((xu + 1, yu + 1), (xu, yu + 1)));
            }
        }
    }
    segments
}

/// Chain directed segments into closed loops, consuming all of them.
fn chain_segments(segments: Vec<(Point, Point)>) -> Result<Vec<Vec<Point>>, Error> {
    let mut by_start: HashMap<Point, Vec<usize>> = HashMap::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        by_start.entry(seg.0).or_default().push(i);
    }

    let mut consumed = vec![false; segments.len()];
    let mut loops = Vec::new();

    for first in 0..segments.len() {
        if consumed[first] {
            continue;
        }
        consumed[first] = true;
        let (start, mut cursor) = segments[first];
        let mut points = vec![start];

        while cursor != start {
            points.push(cursor);
            let next = by_start.get_mut(&cursor).and_then(|candidates| {
                while let Some(i) = candidates.pop() {
                    if !consumed[i] {
                        return Some(i);
                    }
                }
                None
            });
            let Some(next) = next else {
                let from = points[points.len() - 2];
                let remaining = consumed.iter().filter(|&&c| !c).count();
                return Err(Error::ChainStuck {
                    from,
                    to: cursor,
                    remaining,
                });
            };
            consumed[next] = true;
            cursor = segments[next].1;
        }

        loops.push(points);
    }

    Ok(loops)
}
