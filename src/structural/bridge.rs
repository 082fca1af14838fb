//! Pattern: Bridge
//! Example: shapes (abstraction) drawn by interchangeable renderers (implementation)

use crate::error::Result;
use crate::scaffold::Registry;

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&self, shape_name: &str, area: f64) -> String;
}

pub struct RasterRenderer;
pub struct VectorRenderer;

impl Renderer for RasterRenderer {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn render(&self, shape_name: &str, area: f64) -> String {
        format!("Rasterizing {shape_name} with area {area:.2}")
    }
}

impl Renderer for VectorRenderer {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn render(&self, shape_name: &str, area: f64) -> String {
        format!("Vectorizing {shape_name} with area {area:.2}")
    }
}

pub fn renderer(name: &str) -> Result<Box<dyn Renderer>> {
    Registry::new("renderer")
        .register("raster", || Box::new(RasterRenderer) as Box<dyn Renderer>)
        .register("vector", || Box::new(VectorRenderer) as Box<dyn Renderer>)
        .create(name)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Figure {
    Circle { radius: f64 },
    Square { side: f64 },
}

impl Figure {
    pub fn name(&self) -> &'static str {
        match self {
            Figure::Circle { .. } => "Circle",
            Figure::Square { .. } => "Square",
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            Figure::Circle { radius } => std::f64::consts::PI * radius * radius,
            Figure::Square { side } => side * side,
        }
    }
}

/// A figure bound to whichever renderer it is currently drawn with.
pub struct DrawnShape {
    figure: Figure,
    renderer: Box<dyn Renderer>,
}

impl DrawnShape {
    pub fn new(figure: Figure, renderer: Box<dyn Renderer>) -> Self {
        Self { figure, renderer }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    pub fn draw(&self) -> String {
        self.renderer.render(self.figure.name(), self.figure.area())
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pairing_draws() {
        let mut square = DrawnShape::new(Figure::Square { side: 5.0 }, renderer("raster").unwrap());
        assert_eq!(square.draw(), "Rasterizing Square with area 25.00");

        square.set_renderer(renderer("vector").unwrap());
        assert_eq!(square.renderer_name(), "vector");
        assert_eq!(square.draw(), "Vectorizing Square with area 25.00");
    }

    #[test]
    fn test_circle_area() {
        let circle = DrawnShape::new(Figure::Circle { radius: 1.0 }, Box::new(VectorRenderer));
        assert_eq!(circle.draw(), "Vectorizing Circle with area 3.14");
    }

    #[test]
    fn test_unknown_renderer() {
        assert!(renderer("ascii").is_err());
    }
}
