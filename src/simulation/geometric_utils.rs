//! Geometric utility functions for ray sensing and body overlap tests.
//!
//! Everything here is pure. Degenerate inputs (parallel or zero-length
//! segments) produce "no intersection" rather than an error.

use geo::algorithm::Distance;
use geo::{Coord, Euclidean, Line, Point, Rect};

/// Intersection point of two finite segments.
///
/// Solves the 2×2 parametric system for `a` and `b`.
///
/// # Returns
///
/// `None` when the determinant is exactly zero (parallel, collinear or
/// zero-length segments) or when either parameter falls outside `[0, 1]`.
pub fn segment_intersection(a: &Line<f32>, b: &Line<f32>) -> Option<Coord<f32>> {
    let (x1, y1) = a.start.x_y();
    let (x2, y2) = a.end.x_y();
    let (x3, y3) = b.start.x_y();
    let (x4, y4) = b.end.x_y();

    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if denom == 0.0 {
        return None;
    }

    let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
    let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(Coord {
            x: x1 + ua * (x2 - x1),
            y: y1 + ua * (y2 - y1),
        })
    } else {
        None
    }
}

/// The four edges of a rectangle in winding order: top, right, bottom, left.
///
/// "Top" is the edge at `min.y`.
pub fn rect_edges(rect: &Rect<f32>) -> [Line<f32>; 4] {
    let min = rect.min();
    let max = rect.max();
    let top_left = min;
    let top_right = Coord { x: max.x, y: min.y };
    let bottom_right = max;
    let bottom_left = Coord { x: min.x, y: max.y };

    [
        Line::new(top_left, top_right),
        Line::new(top_right, bottom_right),
        Line::new(bottom_right, bottom_left),
        Line::new(bottom_left, top_left),
    ]
}

/// Every point where `segment` crosses an edge of `rect`.
///
/// Between 0 and 4 points, in edge winding order. A segment passing exactly
/// through a corner reports that corner once per edge; duplicates are kept.
pub fn segment_intersections_with_rect(segment: &Line<f32>, rect: &Rect<f32>) -> Vec<Coord<f32>> {
    rect_edges(rect)
        .iter()
        .filter_map(|edge| segment_intersection(segment, edge))
        .collect()
}

/// Distance from the start of `segment` to the nearest point where it
/// crosses the boundary of `rect`.
///
/// A segment lying entirely inside the rectangle never crosses an edge and
/// therefore reports `None`.
pub fn distance_to_rect(segment: &Line<f32>, rect: &Rect<f32>) -> Option<f32> {
    segment_intersections_with_rect(segment, rect)
        .into_iter()
        .map(|point| distance(segment.start, point))
        .min_by(f32::total_cmp)
}

/// Euclidean distance between two points.
pub fn distance(p1: Coord<f32>, p2: Coord<f32>) -> f32 {
    Euclidean.distance(Point::from(p1), Point::from(p2))
}

/// Endpoint of a ray of `length` leaving `start` at `angle` radians.
pub fn ray_end(start: Coord<f32>, length: f32, angle: f32) -> Coord<f32> {
    Coord {
        x: start.x + length * angle.cos(),
        y: start.y + length * angle.sin(),
    }
}

/// Strict overlap of two axis-aligned rectangles.
///
/// Rectangles that only share an edge or a corner do not overlap.
pub fn rects_overlap(a: &Rect<f32>, b: &Rect<f32>) -> bool {
    a.min().x < b.max().x && b.min().x < a.max().x && a.min().y < b.max().y && b.min().y < a.max().y
}
