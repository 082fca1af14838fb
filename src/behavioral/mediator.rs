//! Pattern: Mediator
//! Example: aircraft that only talk to the control tower, and trains that ask the
//! station manager for the single platform

use std::collections::VecDeque;

use crate::error::{CatalogError, Result};

// ============================================
// 1. Flight control
// ============================================

#[derive(Debug, Clone)]
pub struct Airplane {
    name: String,
    altitude: u32,
    inbox: Vec<String>,
}

impl Airplane {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            altitude: 0,
            inbox: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn altitude(&self) -> u32 {
        self.altitude
    }

    pub fn inbox(&self) -> &[String] {
        &self.inbox
    }

    fn perform_action(&mut self, action: String) {
        self.inbox.push(action);
    }
}

/// Result of an altitude request as seen by the requesting aircraft.
#[derive(Debug, Clone, PartialEq)]
pub enum AltitudeChange {
    Changed { notified: usize },
    AlreadyThere,
}

/// Owns every aircraft in its airspace; aircraft never reference each other.
#[derive(Debug, Default)]
pub struct FlightControlTower {
    airplanes: Vec<Airplane>,
}

impl FlightControlTower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_aircraft(&mut self, airplane: Airplane) {
        self.airplanes.push(airplane);
    }

    pub fn aircraft(&self, name: &str) -> Option<&Airplane> {
        self.airplanes.iter().find(|a| a.name == name)
    }

    pub fn request_altitude_change(&mut self, name: &str, altitude: u32) -> Result<AltitudeChange> {
        let plane = self
            .airplanes
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| CatalogError::unknown("aircraft", name))?;

        if plane.altitude == altitude {
            return Ok(AltitudeChange::AlreadyThere);
        }
        plane.altitude = altitude;
        let sender = plane.name.clone();

        let notified = self.notify(&sender, &format!("{sender} is changing altitude to {altitude}"));
        Ok(AltitudeChange::Changed { notified })
    }

    /// Delivers to every aircraft except the sender; returns how many were told.
    fn notify(&mut self, sender: &str, action: &str) -> usize {
        let mut notified = 0;
        for airplane in self.airplanes.iter_mut().filter(|a| a.name != sender) {
            airplane.perform_action(format!("{action} (by {sender})"));
            notified += 1;
        }
        tracing::debug!(sender, notified, "tower broadcast");
        notified
    }
}

// ============================================
// 2. Railway station
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainKind {
    Passenger,
    Freight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: String,
    pub kind: TrainKind,
}

impl Train {
    pub fn passenger(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: TrainKind::Passenger,
        }
    }

    pub fn freight(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: TrainKind::Freight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    Arrived,
    Queued { position: usize },
}

/// Grants the single platform to one train at a time and queues the rest.
#[derive(Debug, Default)]
pub struct StationManager {
    on_platform: Option<Train>,
    queue: VecDeque<Train>,
}

impl StationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrive(&mut self, train: Train) -> Arrival {
        if self.on_platform.is_none() {
            tracing::info!(train = %train.id, "arrived at platform");
            self.on_platform = Some(train);
            return Arrival::Arrived;
        }
        tracing::info!(train = %train.id, "platform busy, waiting");
        self.queue.push_back(train);
        Arrival::Queued {
            position: self.queue.len(),
        }
    }

    /// Frees the platform; the next queued train (if any) takes it and is returned.
    pub fn depart(&mut self, train_id: &str) -> Result<Option<&Train>> {
        match &self.on_platform {
            Some(train) if train.id == train_id => {}
            _ => return Err(CatalogError::unknown("train on platform", train_id)),
        }
        self.on_platform = self.queue.pop_front();
        Ok(self.on_platform.as_ref())
    }

    pub fn on_platform(&self) -> Option<&Train> {
        self.on_platform.as_ref()
    }

    pub fn waiting(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> FlightControlTower {
        let mut tower = FlightControlTower::new();
        for name in ["Plane1", "Plane2", "Plane3"] {
            tower.add_aircraft(Airplane::new(name));
        }
        tower
    }

    #[test]
    fn test_change_notifies_everyone_else() {
        let mut tower = tower();
        let outcome = tower.request_altitude_change("Plane1", 10_000).unwrap();

        assert_eq!(outcome, AltitudeChange::Changed { notified: 2 });
        assert!(tower.aircraft("Plane1").unwrap().inbox().is_empty());
        assert_eq!(
            tower.aircraft("Plane2").unwrap().inbox(),
            ["Plane1 is changing altitude to 10000 (by Plane1)"]
        );
        assert_eq!(tower.aircraft("Plane1").unwrap().altitude(), 10_000);
    }

    #[test]
    fn test_same_altitude_is_quiet() {
        let mut tower = tower();
        tower.request_altitude_change("Plane2", 15_000).unwrap();
        let again = tower.request_altitude_change("Plane2", 15_000).unwrap();
        assert_eq!(again, AltitudeChange::AlreadyThere);
        assert_eq!(tower.aircraft("Plane3").unwrap().inbox().len(), 1);
    }

    #[test]
    fn test_unknown_aircraft() {
        assert!(tower().request_altitude_change("Ghost", 1).is_err());
    }

    #[test]
    fn test_platform_is_exclusive() {
        let mut station = StationManager::new();
        assert_eq!(station.arrive(Train::passenger("P1")), Arrival::Arrived);
        assert_eq!(station.arrive(Train::freight("F1")), Arrival::Queued { position: 1 });
        assert_eq!(station.waiting(), 1);

        let next = station.depart("P1").unwrap().cloned();
        assert_eq!(next, Some(Train::freight("F1")));
        assert_eq!(station.waiting(), 0);

        assert!(station.depart("P1").is_err());
        assert_eq!(station.depart("F1").unwrap(), None);
        assert!(station.on_platform().is_none());
    }
}
