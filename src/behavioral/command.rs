//! Pattern: Command
//! Example: smart-home remote control queuing light, fan and thermostat commands,
//! with an undo history of executed commands

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{CatalogError, Result};

// ============================================
// 1. Receivers
// ============================================

#[derive(Debug, Default)]
pub struct Light {
    pub is_on: bool,
}

#[derive(Debug, Default)]
pub struct Fan {
    pub is_on: bool,
}

#[derive(Debug)]
pub struct Thermostat {
    pub temperature: i32,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self { temperature: 20 }
    }
}

// ============================================
// 2. Commands
// ============================================

pub trait Command {
    fn execute(&mut self) -> String;
    fn undo(&mut self) -> String;
}

pub struct LightCommand {
    light: Rc<RefCell<Light>>,
    turn_on: bool,
    previous: bool,
}

impl LightCommand {
    pub fn on(light: &Rc<RefCell<Light>>) -> Self {
        Self {
            light: Rc::clone(light),
            turn_on: true,
            previous: false,
        }
    }

    pub fn off(light: &Rc<RefCell<Light>>) -> Self {
        Self {
            light: Rc::clone(light),
            turn_on: false,
            previous: false,
        }
    }
}

fn on_off(is_on: bool) -> &'static str {
    if is_on {
        "ON"
    } else {
        "OFF"
    }
}

impl Command for LightCommand {
    fn execute(&mut self) -> String {
        let mut light = self.light.borrow_mut();
        self.previous = light.is_on;
        light.is_on = self.turn_on;
        format!("Light is {}", on_off(light.is_on))
    }

    fn undo(&mut self) -> String {
        let mut light = self.light.borrow_mut();
        light.is_on = self.previous;
        format!("Light is {}", on_off(light.is_on))
    }
}

pub struct FanCommand {
    fan: Rc<RefCell<Fan>>,
    turn_on: bool,
    previous: bool,
}

impl FanCommand {
    pub fn on(fan: &Rc<RefCell<Fan>>) -> Self {
        Self {
            fan: Rc::clone(fan),
            turn_on: true,
            previous: false,
        }
    }

    pub fn off(fan: &Rc<RefCell<Fan>>) -> Self {
        Self {
            fan: Rc::clone(fan),
            turn_on: false,
            previous: false,
        }
    }
}

impl Command for FanCommand {
    fn execute(&mut self) -> String {
        let mut fan = self.fan.borrow_mut();
        self.previous = fan.is_on;
        fan.is_on = self.turn_on;
        format!("Fan is {}", on_off(fan.is_on))
    }

    fn undo(&mut self) -> String {
        let mut fan = self.fan.borrow_mut();
        fan.is_on = self.previous;
        format!("Fan is {}", on_off(fan.is_on))
    }
}

pub struct ThermostatSetCommand {
    thermostat: Rc<RefCell<Thermostat>>,
    target: i32,
    previous: i32,
}

impl ThermostatSetCommand {
    pub fn new(thermostat: &Rc<RefCell<Thermostat>>, target: i32) -> Self {
        Self {
            thermostat: Rc::clone(thermostat),
            target,
            previous: target,
        }
    }
}

impl Command for ThermostatSetCommand {
    fn execute(&mut self) -> String {
        let mut t = self.thermostat.borrow_mut();
        self.previous = t.temperature;
        t.temperature = self.target;
        format!("Thermostat set to {} degrees", t.temperature)
    }

    fn undo(&mut self) -> String {
        let mut t = self.thermostat.borrow_mut();
        t.temperature = self.previous;
        format!("Thermostat set to {} degrees", t.temperature)
    }
}

// ============================================
// 3. Invoker
// ============================================

/// Pending commands form a stack; pressing the button runs the most recent one.
#[derive(Default)]
pub struct RemoteControl {
    pending: Vec<Box<dyn Command>>,
    history: Vec<Box<dyn Command>>,
}

impl RemoteControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_command(&mut self, command: Box<dyn Command>) {
        self.pending.push(command);
    }

    /// `None` when no command is waiting.
    pub fn press_button(&mut self) -> Option<String> {
        let mut command = self.pending.pop()?;
        let output = command.execute();
        tracing::debug!(%output, "command executed");
        self.history.push(command);
        Some(output)
    }

    pub fn undo(&mut self) -> Result<String> {
        let mut command = self.history.pop().ok_or(CatalogError::NothingToUndo)?;
        Ok(command.undo())
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn executed(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_runs_most_recent() {
        let light = Rc::new(RefCell::new(Light::default()));
        let fan = Rc::new(RefCell::new(Fan::default()));
        let mut remote = RemoteControl::new();

        remote.set_command(Box::new(LightCommand::on(&light)));
        remote.set_command(Box::new(FanCommand::on(&fan)));

        assert_eq!(remote.press_button().as_deref(), Some("Fan is ON"));
        assert!(fan.borrow().is_on);
        assert!(!light.borrow().is_on);
        assert_eq!(remote.pending(), 1);

        assert_eq!(remote.press_button().as_deref(), Some("Light is ON"));
        assert_eq!(remote.press_button(), None);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let thermostat = Rc::new(RefCell::new(Thermostat::default()));
        let mut remote = RemoteControl::new();

        remote.set_command(Box::new(ThermostatSetCommand::new(&thermostat, 22)));
        remote.press_button();
        assert_eq!(thermostat.borrow().temperature, 22);

        assert_eq!(remote.undo().unwrap(), "Thermostat set to 20 degrees");
        assert_eq!(thermostat.borrow().temperature, 20);
        assert_eq!(remote.undo(), Err(CatalogError::NothingToUndo));
    }

    #[test]
    fn test_off_then_undo() {
        let light = Rc::new(RefCell::new(Light { is_on: true }));
        let mut remote = RemoteControl::new();
        remote.set_command(Box::new(LightCommand::off(&light)));

        assert_eq!(remote.press_button().unwrap(), "Light is OFF");
        assert_eq!(remote.executed(), 1);
        assert_eq!(remote.undo().unwrap(), "Light is ON");
    }
}
