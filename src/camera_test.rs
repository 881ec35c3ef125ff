#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
    assert_eq!(Point::new(7.0, 7.0).distance(Point::new(7.0, 7.0)), 0.0);
}

#[test]
fn angle_to_axes() {
    let o = Point::new(0.0, 0.0);
    assert!(approx_eq(o.angle_to(Point::new(10.0, 0.0)), 0.0));
    assert!(approx_eq(o.angle_to(Point::new(0.0, 10.0)), 90.0));
    assert!(approx_eq(o.angle_to(Point::new(-10.0, 0.0)), 180.0));
    assert!(approx_eq(o.angle_to(Point::new(0.0, -10.0)), 270.0));
}

#[test]
fn angle_to_is_never_negative() {
    let a = Point::new(0.0, 0.0).angle_to(Point::new(10.0, -10.0));
    assert!(approx_eq(a, 315.0));
}

#[test]
fn offset_polar_on_axis_is_exact() {
    let p = Point::new(5.0, 5.0).offset_polar(90.0, 20.0);
    assert_eq!(p, Point::new(5.0, 25.0));
    let q = Point::new(5.0, 5.0).offset_polar(180.0, 20.0);
    assert_eq!(q, Point::new(-15.0, 5.0));
}

#[test]
fn offset_polar_diagonal() {
    let p = Point::new(0.0, 0.0).offset_polar(45.0, 2f64.sqrt());
    assert!(point_approx_eq(p, Point::new(1.0, 1.0)));
}

#[test]
fn rotated_quarter_turns_towards_positive_angle() {
    let start = Point::new(10.0, 10.0);
    let end = Point::new(110.0, 10.0);
    let rotated = end.rotated_quarter_about(start);
    assert_eq!(rotated, Point::new(10.0, 110.0));
    assert!(approx_eq(start.angle_to(rotated), 90.0));
}

#[test]
fn four_quarter_turns_return_home() {
    let center = Point::new(3.0, -2.0);
    let p = Point::new(8.0, 1.0);
    let back = p
        .rotated_quarter_about(center)
        .rotated_quarter_about(center)
        .rotated_quarter_about(center)
        .rotated_quarter_about(center);
    assert_eq!(back, p);
}

// --- Angle helpers ---

#[test]
fn normalize_degrees_wraps() {
    assert_eq!(normalize_degrees(450.0), 90.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-1e-20), 0.0);
}

#[test]
fn unit_vector_exact_for_quarter_turns() {
    assert_eq!(unit_vector(0.0), (1.0, 0.0));
    assert_eq!(unit_vector(90.0), (0.0, 1.0));
    assert_eq!(unit_vector(180.0), (-1.0, 0.0));
    assert_eq!(unit_vector(270.0), (0.0, -1.0));
    assert_eq!(unit_vector(360.0), (1.0, 0.0));
}

#[test]
fn round_to_precision() {
    assert_eq!(round_to(3.46, 0), 3.0);
    assert_eq!(round_to(3.5, 0), 4.0);
    assert!(approx_eq(round_to(3.46, 1), 3.5));
    assert!(approx_eq(round_to(3.14159, 2), 3.14));
}

// --- Camera ---

#[test]
fn camera_default_zoom_is_one() {
    assert_eq!(Camera::default().zoom, 1.0);
}

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    assert!(point_approx_eq(cam.screen_to_world(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let cam = Camera { zoom: 4.0 };
    let world = cam.screen_to_world(Point::new(40.0, 80.0));
    assert!(point_approx_eq(world, Point::new(10.0, 20.0)));
}

#[test]
fn screen_dist_to_world_scales_inversely() {
    let cam = Camera { zoom: 2.0 };
    assert_eq!(cam.screen_dist_to_world(10.0), 5.0);
}

#[test]
fn zoom_in_steps_and_caps() {
    let mut cam = Camera::default();
    cam.zoom_in();
    assert!(approx_eq(cam.zoom, 1.1));
    for _ in 0..50 {
        cam.zoom_in();
    }
    assert_eq!(cam.zoom, 5.0);
}

#[test]
fn zoom_out_steps_and_floors() {
    let mut cam = Camera::default();
    cam.zoom_out();
    assert!(approx_eq(cam.zoom, 1.0 / 1.1));
    for _ in 0..50 {
        cam.zoom_out();
    }
    assert_eq!(cam.zoom, 0.5);
}
