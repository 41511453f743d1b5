#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use creatures::simulation::geometric_utils::{
    distance, distance_to_rect, ray_end, rect_edges, rects_overlap, segment_intersection,
    segment_intersections_with_rect,
};
use geo::{Coord, Line, Rect};

const EPS: f32 = 1e-4;

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect<f32> {
    Rect::new(Coord { x, y }, Coord { x: x + width, y: y + height })
}

fn close(a: Coord<f32>, b: Coord<f32>) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

#[test]
fn test_segment_crosses_rectangle_twice() {
    let segment = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 });
    let target = rect(5.0, -5.0, 2.0, 10.0);

    let points = segment_intersections_with_rect(&segment, &target);
    assert_eq!(points.len(), 2);
    assert!(points.iter().any(|p| close(*p, Coord { x: 5.0, y: 0.0 })));
    assert!(points.iter().any(|p| close(*p, Coord { x: 7.0, y: 0.0 })));

    let d = distance_to_rect(&segment, &target).unwrap();
    assert!((d - 5.0).abs() < EPS);
}

#[test]
fn test_parallel_segments_do_not_intersect() {
    let a = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 });
    let b = Line::new(Coord { x: 0.0, y: 1.0 }, Coord { x: 10.0, y: 1.0 });
    assert!(segment_intersection(&a, &b).is_none());

    // Collinear overlap is reported as no intersection too
    let c = Line::new(Coord { x: 2.0, y: 0.0 }, Coord { x: 8.0, y: 0.0 });
    assert!(segment_intersection(&a, &c).is_none());
}

#[test]
fn test_zero_length_segment_does_not_intersect() {
    let point = Line::new(Coord { x: 1.0, y: 1.0 }, Coord { x: 1.0, y: 1.0 });
    let b = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 });
    assert!(segment_intersection(&point, &b).is_none());
}

#[test]
fn test_segments_that_would_cross_if_extended() {
    let a = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 });
    let b = Line::new(Coord { x: 5.0, y: -1.0 }, Coord { x: 5.0, y: 1.0 });
    assert!(segment_intersection(&a, &b).is_none());
}

#[test]
fn test_crossing_segments() {
    let a = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 4.0 });
    let b = Line::new(Coord { x: 0.0, y: 4.0 }, Coord { x: 4.0, y: 0.0 });
    let p = segment_intersection(&a, &b).unwrap();
    assert!(close(p, Coord { x: 2.0, y: 2.0 }));
}

#[test]
fn test_segment_missing_rectangle() {
    let segment = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 });
    let target = rect(5.0, 3.0, 2.0, 2.0);
    assert!(segment_intersections_with_rect(&segment, &target).is_empty());
    assert!(distance_to_rect(&segment, &target).is_none());
}

#[test]
fn test_segment_inside_rectangle_reports_nothing() {
    let segment = Line::new(Coord { x: 1.0, y: 1.0 }, Coord { x: 2.0, y: 1.0 });
    let target = rect(0.0, 0.0, 10.0, 10.0);
    assert!(distance_to_rect(&segment, &target).is_none());
}

#[test]
fn test_rect_edges_order() {
    let edges = rect_edges(&rect(1.0, 2.0, 3.0, 4.0));

    // top, right, bottom, left
    assert_eq!(edges[0].start, Coord { x: 1.0, y: 2.0 });
    assert_eq!(edges[0].end, Coord { x: 4.0, y: 2.0 });
    assert_eq!(edges[1].end, Coord { x: 4.0, y: 6.0 });
    assert_eq!(edges[2].end, Coord { x: 1.0, y: 6.0 });
    assert_eq!(edges[3].end, Coord { x: 1.0, y: 2.0 });
}

#[test]
fn test_distance_and_ray_end() {
    let d = distance(Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 });
    assert!((d - 5.0).abs() < EPS);

    let end = ray_end(Coord { x: 1.0, y: 1.0 }, 2.0, std::f32::consts::FRAC_PI_2);
    assert!(close(end, Coord { x: 1.0, y: 3.0 }));
}

#[test]
fn test_rects_overlap_is_strict() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(rects_overlap(&a, &rect(5.0, 5.0, 10.0, 10.0)));
    assert!(rects_overlap(&a, &rect(2.0, 2.0, 1.0, 1.0)));

    // Shared edge and shared corner
    assert!(!rects_overlap(&a, &rect(10.0, 0.0, 5.0, 5.0)));
    assert!(!rects_overlap(&a, &rect(10.0, 10.0, 5.0, 5.0)));
    assert!(!rects_overlap(&a, &rect(20.0, 20.0, 5.0, 5.0)));
}
