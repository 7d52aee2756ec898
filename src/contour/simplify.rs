//! Collapse collinear boundary runs to the minimal vertex set.
//!
//! Traced loops carry one vertex per unit segment; most of them lie in the
//! middle of straight runs. A vertex is redundant exactly when its two cyclic
//! neighbors share its x or its y (all segments are axis-aligned, so exact
//! integer equality is the collinearity test; no tolerance). Each pass scans
//! every consecutive triple with wrap-around and drops the redundant set;
//! passes repeat until nothing changes, since a removal can expose a new
//! collinearity across the seam. The boundary path and enclosed area are
//! preserved exactly.
use crate::contour::Point;

/// Reduce a loop to its direction-change vertices.
pub fn minimal_polygon(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    loop {
        let n = pts.len();
        if n < 3 {
            break;
        }

        let mut keep = vec![true; n];
        let mut removed = 0usize;
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            if (prev.0 == cur.0 && cur.0 == next.0) || (prev.1 == cur.1 && cur.1 == next.1) {
                keep[i] = false;
                removed += 1;
            }
        }

        if removed == 0 {
            break;
        }
        pts = pts
            .iter()
            .zip(&keep)
            .filter_map(|(p, &k)| k.then_some(*p))
            .collect();
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::minimal_polygon;
    use crate::contour::{signed_area2, Point};

    fn unit_steps_square(side: u32) -> Vec<Point> {
        // one vertex per unit segment, as the tracer emits
        let mut pts = Vec::new();
        for y in (1..=side).rev() {
            pts.push((0, y));
        }
        for x in 0..side {
            pts.push((x, 0));
        }
        for y in 0..side {
            pts.push((side, y));
        }
        for x in (1..=side).rev() {
            pts.push((x, side));
        }
        pts
    }

    #[test]
    fn square_reduces_to_four_corners() {
        let dense = unit_steps_square(4);
        assert_eq!(dense.len(), 16);
        let minimal = minimal_polygon(&dense);
        assert_eq!(minimal.len(), 4);
        for corner in [(0, 0), (4, 0), (4, 4), (0, 4)] {
            assert!(minimal.contains(&corner), "missing corner {corner:?}");
        }
    }

    #[test]
    fn collinear_run_across_the_seam_is_removed() {
        // start index sits in the middle of the left edge
        let mut dense = unit_steps_square(3);
        dense.rotate_left(1);
        let minimal = minimal_polygon(&dense);
        assert_eq!(minimal.len(), 4);
    }

    #[test]
    fn simplification_is_idempotent() {
        let dense = unit_steps_square(5);
        let once = minimal_polygon(&dense);
        let twice = minimal_polygon(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn minimal_polygon_is_returned_unchanged() {
        let corners: Vec<Point> = vec![(0, 3), (0, 0), (3, 0), (3, 3)];
        assert_eq!(minimal_polygon(&corners), corners);
    }

    #[test]
    fn enclosed_area_is_preserved() {
        // L-shaped loop with dense unit steps
        let dense: Vec<Point> = vec![
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (3, 1),
            (2, 1),
            (1, 1),
            (1, 2),
        ];
        let minimal = minimal_polygon(&dense);
        assert_eq!(signed_area2(&dense), signed_area2(&minimal));
        assert!(minimal.len() < dense.len());
    }
}
