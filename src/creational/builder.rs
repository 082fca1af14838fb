//! Pattern: Builder
//! Example: a director driving interchangeable car builders, and a consuming
//! computer builder with runtime validation

use std::fmt;

use crate::error::{CatalogError, Result};
use crate::scaffold::Registry;

// ============================================
// 1. Director + step builders
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Car {
    pub seats: u8,
    pub engine: String,
    pub trip_computer: bool,
    pub gps: bool,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seats: {}, engine: {}, trip computer: {}, gps: {}",
            self.seats, self.engine, self.trip_computer, self.gps
        )
    }
}

pub trait CarBuilder {
    fn set_seats(&mut self);
    fn set_engine(&mut self);
    fn set_trip_computer(&mut self);
    fn set_gps(&mut self);
    fn car(&self) -> Car;
}

#[derive(Default)]
pub struct SuvBuilder {
    car: Car,
}

impl CarBuilder for SuvBuilder {
    fn set_seats(&mut self) {
        self.car.seats = 4;
    }
    fn set_engine(&mut self) {
        self.car.engine = "1.6".to_string();
    }
    fn set_trip_computer(&mut self) {
        self.car.trip_computer = true;
    }
    fn set_gps(&mut self) {
        self.car.gps = true;
    }
    fn car(&self) -> Car {
        self.car.clone()
    }
}

#[derive(Default)]
pub struct SportBuilder {
    car: Car,
}

impl CarBuilder for SportBuilder {
    fn set_seats(&mut self) {
        self.car.seats = 2;
    }
    fn set_engine(&mut self) {
        self.car.engine = "3.0".to_string();
    }
    fn set_trip_computer(&mut self) {
        self.car.trip_computer = false;
    }
    fn set_gps(&mut self) {
        self.car.gps = false;
    }
    fn car(&self) -> Car {
        self.car.clone()
    }
}

pub fn car_builder(kind: &str) -> Result<Box<dyn CarBuilder>> {
    Registry::new("car builder")
        .register("suv", || Box::new(SuvBuilder::default()) as Box<dyn CarBuilder>)
        .register("sport", || Box::new(SportBuilder::default()) as Box<dyn CarBuilder>)
        .create(kind)
}

/// Runs the construction steps in a fixed order against whichever builder it holds.
pub struct Director {
    builder: Box<dyn CarBuilder>,
}

impl Director {
    pub fn new(builder: Box<dyn CarBuilder>) -> Self {
        Self { builder }
    }

    pub fn set_builder(&mut self, builder: Box<dyn CarBuilder>) {
        self.builder = builder;
    }

    pub fn construct(&mut self) -> Car {
        self.builder.set_seats();
        self.builder.set_engine();
        self.builder.set_trip_computer();
        self.builder.set_gps();
        self.builder.car()
    }
}

// ============================================
// 2. Consuming builder with validation
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    pub cpu: String,
    pub ram_gb: u32,
    pub storage: String,
}

// Required fields stay `Option` until `build`.
#[derive(Debug, Default)]
pub struct ComputerBuilder {
    cpu: Option<String>,
    ram_gb: Option<u32>,
    storage: Option<String>,
}

impl ComputerBuilder {
    pub fn new() -> Self {
        ComputerBuilder::default()
    }

    pub fn cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn ram(mut self, gigabytes: u32) -> Self {
        self.ram_gb = Some(gigabytes);
        self
    }

    pub fn storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }

    pub fn build(self) -> Result<Computer> {
        let cpu = self
            .cpu
            .filter(|cpu| !cpu.trim().is_empty())
            .ok_or_else(|| CatalogError::invalid("cpu", "is required"))?;
        let ram_gb = self
            .ram_gb
            .ok_or_else(|| CatalogError::invalid("ram", "is required"))?;
        if ram_gb == 0 {
            return Err(CatalogError::invalid("ram", "must be at least 1 GB"));
        }

        Ok(Computer {
            cpu,
            ram_gb,
            storage: self.storage.unwrap_or_else(|| "SSD".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_builds_suv_and_sport() {
        let mut director = Director::new(car_builder("suv").unwrap());
        let suv = director.construct();
        assert_eq!(suv.seats, 4);
        assert_eq!(suv.engine, "1.6");
        assert!(suv.gps && suv.trip_computer);

        director.set_builder(car_builder("sport").unwrap());
        let sport = director.construct();
        assert_eq!(sport.seats, 2);
        assert_eq!(sport.engine, "3.0");
        assert!(!sport.gps);
    }

    #[test]
    fn test_unknown_builder() {
        assert!(car_builder("truck").err().unwrap().is_unknown_variant());
    }

    #[test]
    fn test_computer_builder() {
        let pc = ComputerBuilder::new()
            .cpu("Intel Core i7")
            .ram(16)
            .storage("NVMe")
            .build()
            .unwrap();
        assert_eq!(pc.cpu, "Intel Core i7");
        assert_eq!(pc.ram_gb, 16);
        assert_eq!(pc.storage, "NVMe");
    }

    #[test]
    fn test_computer_builder_requires_fields() {
        let err = ComputerBuilder::new().ram(8).build().unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref field, .. } if field == "cpu"));

        let err = ComputerBuilder::new().cpu("M2").ram(0).build().unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref field, .. } if field == "ram"));

        let pc = ComputerBuilder::new().cpu("M2").ram(8).build().unwrap();
        assert_eq!(pc.storage, "SSD");
    }
}
