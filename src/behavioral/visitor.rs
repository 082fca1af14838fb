//! Pattern: Visitor
//! Example: area, perimeter and middle-point calculations added to a closed set of
//! shapes without touching the shape types
//!
//! Each shape calls back the matching `visit_*` method, so a visitor gets one
//! typed callback per element.

use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ============================================
// 1. Elements
// ============================================

pub trait Shape {
    fn kind(&self) -> &'static str;
    fn accept(&self, visitor: &mut dyn ShapeVisitor);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Axis-aligned; `origin` is the lower-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Shape for Circle {
    fn kind(&self) -> &'static str {
        "Circle"
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_circle(self);
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> &'static str {
        "Rectangle"
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_rectangle(self);
    }
}

impl Shape for Triangle {
    fn kind(&self) -> &'static str {
        "Triangle"
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_triangle(self);
    }
}

// ============================================
// 2. Visitors
// ============================================

pub trait ShapeVisitor {
    fn visit_circle(&mut self, circle: &Circle);
    fn visit_rectangle(&mut self, rectangle: &Rectangle);
    fn visit_triangle(&mut self, triangle: &Triangle);
}

/// Dispatches every shape through `visitor` in order.
pub fn visit_all(shapes: &[Box<dyn Shape>], visitor: &mut dyn ShapeVisitor) {
    for shape in shapes {
        shape.accept(visitor);
    }
}

/// One visitor output for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<T> {
    pub shape: &'static str,
    pub value: T,
}

#[derive(Debug, Default)]
pub struct AreaCalculator {
    pub results: Vec<Measurement<f64>>,
}

#[derive(Debug, Default)]
pub struct PerimeterCalculator {
    pub results: Vec<Measurement<f64>>,
}

#[derive(Debug, Default)]
pub struct MiddleCoordinates {
    pub results: Vec<Measurement<Point>>,
}

impl ShapeVisitor for AreaCalculator {
    fn visit_circle(&mut self, c: &Circle) {
        self.results.push(Measurement {
            shape: c.kind(),
            value: PI * c.radius * c.radius,
        });
    }

    fn visit_rectangle(&mut self, r: &Rectangle) {
        self.results.push(Measurement {
            shape: r.kind(),
            value: r.width * r.height,
        });
    }

    // Shoelace formula.
    fn visit_triangle(&mut self, t: &Triangle) {
        let [a, b, c] = t.vertices;
        let doubled = a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y);
        self.results.push(Measurement {
            shape: t.kind(),
            value: doubled.abs() / 2.0,
        });
    }
}

impl ShapeVisitor for PerimeterCalculator {
    fn visit_circle(&mut self, c: &Circle) {
        self.results.push(Measurement {
            shape: c.kind(),
            value: 2.0 * PI * c.radius,
        });
    }

    fn visit_rectangle(&mut self, r: &Rectangle) {
        self.results.push(Measurement {
            shape: r.kind(),
            value: 2.0 * (r.width + r.height),
        });
    }

    fn visit_triangle(&mut self, t: &Triangle) {
        let [a, b, c] = t.vertices;
        self.results.push(Measurement {
            shape: t.kind(),
            value: a.distance(&b) + b.distance(&c) + c.distance(&a),
        });
    }
}

impl ShapeVisitor for MiddleCoordinates {
    fn visit_circle(&mut self, c: &Circle) {
        self.results.push(Measurement {
            shape: c.kind(),
            value: c.center,
        });
    }

    fn visit_rectangle(&mut self, r: &Rectangle) {
        self.results.push(Measurement {
            shape: r.kind(),
            value: Point::new(r.origin.x + r.width / 2.0, r.origin.y + r.height / 2.0),
        });
    }

    // Centroid.
    fn visit_triangle(&mut self, t: &Triangle) {
        let [a, b, c] = t.vertices;
        self.results.push(Measurement {
            shape: t.kind(),
            value: Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Vec<Box<dyn Shape>> {
        vec![
            Box::new(Circle {
                center: Point::new(0.0, 0.0),
                radius: 5.0,
            }),
            Box::new(Rectangle {
                origin: Point::new(0.0, 0.0),
                width: 4.0,
                height: 6.0,
            }),
            Box::new(Triangle {
                vertices: [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 4.0)],
            }),
        ]
    }

    #[test]
    fn test_area_visits_every_shape() {
        let mut areas = AreaCalculator::default();
        visit_all(&shapes(), &mut areas);

        let kinds: Vec<_> = areas.results.iter().map(|m| m.shape).collect();
        assert_eq!(kinds, ["Circle", "Rectangle", "Triangle"]);
        assert!((areas.results[0].value - 78.539_816).abs() < 1e-5);
        assert_eq!(areas.results[1].value, 24.0);
        assert_eq!(areas.results[2].value, 6.0);
    }

    #[test]
    fn test_perimeter_and_middle() {
        let shapes = shapes();
        let mut perimeters = PerimeterCalculator::default();
        let mut middles = MiddleCoordinates::default();
        visit_all(&shapes, &mut perimeters);
        visit_all(&shapes, &mut middles);

        assert_eq!(perimeters.results[1].value, 20.0);
        assert_eq!(perimeters.results[2].value, 12.0);
        assert_eq!(middles.results[1].value, Point::new(2.0, 3.0));
        assert_eq!(middles.results[2].value, Point::new(1.0, 4.0 / 3.0));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1.0, 2.5).to_string(), "(1.00, 2.50)");
    }
}
