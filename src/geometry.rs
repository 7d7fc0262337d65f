//! Canvas math for the flow curves.
//!
//! Pure helpers only; nothing here knows about readings or SVG.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point on the circle of `radius` around `center`, in the direction
/// of `target`. Coincident points return `center` unchanged so a
/// degenerate layout never divides by zero.
pub fn point_on_circle(center: Point, target: Point, radius: f64) -> Point {
    let dx = target.x - center.x;
    let dy = target.y - center.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance == 0.0 {
        return center;
    }

    Point::new(
        center.x + dx / distance * radius,
        center.y + dy / distance * radius,
    )
}

/// A cubic Bézier between two border points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Default control-point offset, as a fraction of the dominant-axis
/// displacement.
pub const CURVE_INTENSITY: f64 = 0.4;

/// Gentle S-curve between `a` and `b`: control points are offset along
/// whichever axis has the greater absolute displacement, so curves
/// converging near the center of the canvas fan out instead of
/// overlapping.
pub fn curved_between(a: Point, b: Point, intensity: f64) -> CubicCurve {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let (c1, c2) = if dx.abs() > dy.abs() {
        // Mostly horizontal travel.
        (
            Point::new(a.x + dx * intensity, a.y),
            Point::new(b.x - dx * intensity, b.y),
        )
    } else {
        // Mostly vertical travel.
        (
            Point::new(a.x, a.y + dy * intensity),
            Point::new(b.x, b.y - dy * intensity),
        )
    };

    CubicCurve { from: a, c1, c2, to: b }
}

impl CubicCurve {
    /// SVG path data: `M x,y C c1 c2 x,y`, coordinates at centipixel
    /// precision.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {:.2},{:.2} C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            self.from.x, self.from.y,
            self.c1.x, self.c1.y,
            self.c2.x, self.c2.y,
            self.to.x, self.to.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_on_circle_horizontal() {
        let center = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 0.0);
        let p = point_on_circle(center, target, 40.0);
        assert_eq!(p, Point::new(40.0, 0.0));
    }

    #[test]
    fn test_point_on_circle_diagonal_is_on_radius() {
        let center = Point::new(10.0, 20.0);
        let target = Point::new(110.0, 140.0);
        let p = point_on_circle(center, target, 60.0);
        let dist = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
        assert!((dist - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_on_circle_degenerate() {
        let center = Point::new(5.0, 5.0);
        assert_eq!(point_on_circle(center, center, 40.0), center);
    }

    #[test]
    fn test_horizontal_curve_offsets_along_x() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 10.0);
        let curve = curved_between(a, b, CURVE_INTENSITY);
        assert_eq!(curve.c1, Point::new(40.0, 0.0));
        assert_eq!(curve.c2, Point::new(60.0, 10.0));
    }

    #[test]
    fn test_vertical_curve_offsets_along_y() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 100.0);
        let curve = curved_between(a, b, CURVE_INTENSITY);
        assert_eq!(curve.c1, Point::new(0.0, 40.0));
        assert_eq!(curve.c2, Point::new(10.0, 60.0));
    }

    #[test]
    fn test_path_data() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let curve = curved_between(a, b, CURVE_INTENSITY);
        assert_eq!(curve.to_path_data(), "M 0.00,0.00 C 40.00,0.00 60.00,0.00 100.00,0.00");
    }
}
