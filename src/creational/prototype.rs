//! Pattern: Prototype
//! Example: cloning shapes and vehicles through a trait object, plus a registry of
//! named prototypes

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt::Debug;

use crate::error::{CatalogError, Result};

// ============================================
// 1. Shapes
// ============================================

pub trait Shape: Debug {
    fn area(&self) -> f64;
    fn clone_box(&self) -> Box<dyn Shape>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Shape for Rectangle {
    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================
// 2. Vehicles
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub enum Vehicle {
    Car {
        model: String,
        brand: String,
        year: u16,
        color: Option<String>,
    },
    Truck {
        model: String,
        brand: String,
        year: u16,
        load_capacity: u32,
    },
}

impl Vehicle {
    pub fn car(model: &str, brand: &str, year: u16) -> Self {
        Vehicle::Car {
            model: model.to_string(),
            brand: brand.to_string(),
            year,
            color: None,
        }
    }

    pub fn truck(model: &str, brand: &str, year: u16, load_capacity: u32) -> Self {
        Vehicle::Truck {
            model: model.to_string(),
            brand: brand.to_string(),
            year,
            load_capacity,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Vehicle::Car { model, .. } | Vehicle::Truck { model, .. } => model,
        }
    }

    /// Paints a car; trucks are left untouched.
    pub fn with_color(mut self, new_color: &str) -> Self {
        if let Vehicle::Car { color, .. } = &mut self {
            *color = Some(new_color.to_string());
        }
        self
    }

    pub fn with_load_capacity(mut self, capacity: u32) -> Self {
        if let Vehicle::Truck { load_capacity, .. } = &mut self {
            *load_capacity = capacity;
        }
        self
    }
}

// ============================================
// 3. Prototype registry
// ============================================

/// Keeps configured originals and hands out independent copies.
#[derive(Debug, Default)]
pub struct PrototypeRegistry {
    prototypes: BTreeMap<String, Vehicle>,
}

impl PrototypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, prototype: Vehicle) {
        self.prototypes.insert(name.into(), prototype);
    }

    pub fn spawn(&self, name: &str) -> Result<Vehicle> {
        self.prototypes
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::unknown("prototype", name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.prototypes.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloned_shape_is_independent() {
        let original: Box<dyn Shape> = Box::new(Circle { radius: 10.0 });
        let copy = original.clone();
        assert_eq!(copy.area(), original.area());

        let mut bigger = Circle { radius: 10.0 };
        bigger.radius = 20.0;
        assert!((original.area() - PI * 100.0).abs() < 1e-9);
        assert!(bigger.area() > copy.area());
    }

    #[test]
    fn test_vehicle_clone_then_modify() {
        let civic = Vehicle::car("Civic", "Honda", 2022);
        let red = civic.clone().with_color("Red");

        assert!(matches!(&civic, Vehicle::Car { color: None, .. }));
        assert!(matches!(&red, Vehicle::Car { color: Some(c), .. } if c == "Red"));
        assert_eq!(red.model(), "Civic");
    }

    #[test]
    fn test_registry_spawns_copies() {
        let mut registry = PrototypeRegistry::new();
        registry.register("hauler", Vehicle::truck("F-Max", "Ford", 2020, 40));

        let heavy = registry.spawn("hauler").unwrap().with_load_capacity(60);
        let stock = registry.spawn("hauler").unwrap();

        assert!(matches!(heavy, Vehicle::Truck { load_capacity: 60, .. }));
        assert!(matches!(stock, Vehicle::Truck { load_capacity: 40, .. }));
        assert!(registry.spawn("bus").err().unwrap().is_unknown_variant());
        assert_eq!(registry.names(), vec!["hauler"]);
    }
}
