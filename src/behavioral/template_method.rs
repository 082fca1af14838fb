//! Pattern: Template Method
//! Example: a beverage recipe with fixed step order, and one-time-password delivery
//! over SMS or email
//!
//! The skeleton lives in a context struct that holds the injected steps value.

use rand::Rng;

use crate::error::{CatalogError, Result};

// ============================================
// 1. Beverages
// ============================================

/// Steps of a recipe. `add_ingredients` and `brew` are required; the rest have
/// defaults, and `condiments` is a hook that does nothing unless overridden.
pub trait BrewSteps {
    fn name(&self) -> &'static str;

    fn boil_water(&self) -> String {
        "Boiling water...".to_string()
    }

    fn add_ingredients(&self) -> String;
    fn brew(&self) -> String;

    fn condiments(&self) -> Option<String> {
        None
    }

    fn serve(&self) -> String {
        format!("Serving the {}.", self.name())
    }
}

pub struct Tea;

pub struct Coffee {
    pub with_milk: bool,
}

impl BrewSteps for Tea {
    fn name(&self) -> &'static str {
        "tea"
    }

    fn add_ingredients(&self) -> String {
        "Adding tea leaves...".to_string()
    }

    fn brew(&self) -> String {
        "Brewing the tea...".to_string()
    }
}

impl BrewSteps for Coffee {
    fn name(&self) -> &'static str {
        "coffee"
    }

    fn add_ingredients(&self) -> String {
        "Adding coffee grounds...".to_string()
    }

    fn brew(&self) -> String {
        "Brewing the coffee...".to_string()
    }

    fn condiments(&self) -> Option<String> {
        self.with_milk.then(|| "Adding milk...".to_string())
    }
}

pub struct Recipe<S> {
    steps: S,
}

impl<S: BrewSteps> Recipe<S> {
    pub fn new(steps: S) -> Self {
        Self { steps }
    }

    /// Runs every step in order and returns what each one did.
    pub fn prepare(&self) -> Vec<String> {
        let mut log = vec![
            self.steps.boil_water(),
            self.steps.add_ingredients(),
            self.steps.brew(),
        ];
        log.extend(self.steps.condiments());
        log.push(self.steps.serve());
        tracing::debug!(beverage = self.steps.name(), steps = log.len(), "recipe prepared");
        log
    }
}

// ============================================
// 2. One-time passwords
// ============================================

pub trait OtpSteps {
    fn channel(&self) -> &'static str;

    fn gen_random_otp(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn save_otp_cache(&mut self, otp: &str);
    fn message(&self, otp: &str) -> String;
    fn send_notification(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct SmsOtp {
    pub cached: Option<String>,
    pub outbox: Vec<String>,
}

#[derive(Debug, Default)]
pub struct EmailOtp {
    pub cached: Option<String>,
    pub outbox: Vec<String>,
}

impl OtpSteps for SmsOtp {
    fn channel(&self) -> &'static str {
        "sms"
    }

    fn save_otp_cache(&mut self, otp: &str) {
        self.cached = Some(otp.to_string());
    }

    fn message(&self, otp: &str) -> String {
        format!("SMS OTP for login is {otp}")
    }

    fn send_notification(&mut self, message: &str) -> Result<()> {
        self.outbox.push(message.to_string());
        Ok(())
    }
}

impl OtpSteps for EmailOtp {
    fn channel(&self) -> &'static str {
        "email"
    }

    fn save_otp_cache(&mut self, otp: &str) {
        self.cached = Some(otp.to_string());
    }

    fn message(&self, otp: &str) -> String {
        format!("EMAIL OTP for login is {otp}")
    }

    fn send_notification(&mut self, message: &str) -> Result<()> {
        self.outbox.push(message.to_string());
        Ok(())
    }
}

pub struct Otp<S> {
    steps: S,
}

impl<S: OtpSteps> Otp<S> {
    pub fn new(steps: S) -> Self {
        Self { steps }
    }

    pub fn generate_and_send(&mut self, len: usize) -> Result<String> {
        if len == 0 {
            return Err(CatalogError::invalid("otp length", "must be at least 1"));
        }
        let otp = self.steps.gen_random_otp(len);
        self.steps.save_otp_cache(&otp);
        let message = self.steps.message(&otp);
        self.steps.send_notification(&message)?;
        tracing::info!(channel = self.steps.channel(), len, "otp sent");
        Ok(otp)
    }

    pub fn steps(&self) -> &S {
        &self.steps
    }
}
