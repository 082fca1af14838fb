//! Pattern: Chain of Responsibility
//! Example: support agents routing issues by severity, and hospital departments
//! that each do their part before passing the patient on

use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, Result};
use crate::scaffold::{Chain, Dispatch, Flow, Handler};

// ============================================
// 1. Support desk
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Severity {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(CatalogError::unknown("severity", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    pub description: String,
}

impl Issue {
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
        }
    }
}

/// Handles issues of exactly one severity and forwards everything else.
pub struct SupportAgent {
    name: String,
    severity: Severity,
    handled: Vec<String>,
}

impl SupportAgent {
    pub fn new(severity: Severity) -> Self {
        Self {
            name: format!("{severity} agent"),
            severity,
            handled: Vec::new(),
        }
    }

    /// Descriptions of the issues this agent took, oldest first.
    pub fn handled(&self) -> &[String] {
        &self.handled
    }
}

impl Handler<Issue, String> for SupportAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&mut self, issue: &mut Issue) -> Flow<String> {
        if issue.severity != self.severity {
            return Flow::Forward;
        }
        self.handled.push(issue.description.clone());
        Flow::Handled(format!(
            "Agent {} handles issue: {}",
            self.severity, issue.description
        ))
    }
}

pub struct SupportDesk {
    chain: Chain<Issue, String>,
}

impl SupportDesk {
    /// Agents ordered low, medium, high.
    pub fn new() -> Self {
        Self::with_agents(&[Severity::Low, Severity::Medium, Severity::High])
    }

    pub fn with_agents(order: &[Severity]) -> Self {
        let mut chain: Chain<Issue, String> = Chain::new();
        for &severity in order {
            chain.push(Box::new(SupportAgent::new(severity)));
        }
        Self { chain }
    }

    pub fn agents(&self) -> Vec<&str> {
        self.chain.names()
    }

    pub fn submit(&mut self, mut issue: Issue) -> Dispatch<String> {
        self.chain.dispatch(&mut issue)
    }

    /// Like [`SupportDesk::submit`], with the unhandled terminal reported as an error.
    pub fn resolve(&mut self, issue: Issue) -> Result<String> {
        let description = issue.description.clone();
        self.submit(issue)
            .into_result(description)
            .map(|(_, output)| output)
    }
}

impl Default for SupportDesk {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================
// 2. Hospital
// ============================================

/// Marker of one department's work; `already_done` if it was done before arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub department: &'static str,
    pub already_done: bool,
}

/// The request travelling down the chain. `visits` is the trail of the current pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patient {
    pub name: String,
    pub registration_done: bool,
    pub doctor_check_up_done: bool,
    pub medicine_done: bool,
    pub payment_done: bool,
    pub visits: Vec<Visit>,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

macro_rules! department {
    ($ty:ident, $label:literal, $flag:ident, $terminal:expr) => {
        #[derive(Debug, Default)]
        pub struct $ty;

        impl Handler<Patient, Vec<Visit>> for $ty {
            fn name(&self) -> &str {
                $label
            }

            fn handle(&mut self, patient: &mut Patient) -> Flow<Vec<Visit>> {
                let already_done = patient.$flag;
                if already_done {
                    tracing::debug!(patient = %patient.name, department = $label, "step already done");
                } else {
                    tracing::info!(patient = %patient.name, department = $label, "step performed");
                    patient.$flag = true;
                }
                patient.visits.push(Visit {
                    department: $label,
                    already_done,
                });
                if $terminal {
                    Flow::Handled(std::mem::take(&mut patient.visits))
                } else {
                    Flow::Forward
                }
            }
        }
    };
}

department!(Reception, "reception", registration_done, false);
department!(Doctor, "doctor", doctor_check_up_done, false);
department!(Medical, "medical", medicine_done, false);
department!(Cashier, "cashier", payment_done, true);

/// Reception, doctor, medical, then cashier. The cashier ends the chain.
pub struct Hospital {
    chain: Chain<Patient, Vec<Visit>>,
}

impl Hospital {
    pub fn new() -> Self {
        Self {
            chain: Chain::new()
                .link(Reception)
                .link(Doctor)
                .link(Medical)
                .link(Cashier),
        }
    }

    pub fn treat(&mut self, patient: &mut Patient) -> Result<Vec<&'static str>> {
        let name = patient.name.clone();
        patient.visits.clear();
        let (_, visits) = self.chain.dispatch(patient).into_result(name)?;
        Ok(visits
            .into_iter()
            .filter(|v| !v.already_done)
            .map(|v| v.department)
            .collect())
    }
}

impl Default for Hospital {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_medium_issue_handled_by_medium_agent() {
        let mut desk = SupportDesk::new();
        let outcome = desk.submit(Issue::new(Severity::Medium, "Issue 2"));
        assert_eq!(
            outcome,
            Dispatch::Handled {
                by: "medium agent".into(),
                output: "Agent medium handles issue: Issue 2".into()
            }
        );
    }

    #[test]
    fn test_missing_agent_is_unhandled() {
        let mut desk = SupportDesk::with_agents(&[Severity::Low, Severity::Medium]);
        assert_eq!(desk.submit(Issue::new(Severity::High, "outage")), Dispatch::Unhandled);
        assert_eq!(
            desk.resolve(Issue::new(Severity::High, "outage")),
            Err(CatalogError::unhandled("outage"))
        );
    }

    #[test]
    fn test_agent_records_only_its_own_issues() {
        let mut agent = SupportAgent::new(Severity::High);
        assert_eq!(agent.handle(&mut Issue::new(Severity::Low, "typo")), Flow::Forward);
        assert!(matches!(
            agent.handle(&mut Issue::new(Severity::High, "outage")),
            Flow::Handled(_)
        ));
        assert_eq!(agent.handled(), ["outage"]);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("urgent".parse::<Severity>().unwrap_err().is_unknown_variant());
    }

    #[test]
    fn test_hospital_runs_every_department() {
        let mut hospital = Hospital::new();
        let mut patient = Patient::new("abc");

        let steps = hospital.treat(&mut patient).unwrap();
        assert_eq!(steps, vec!["reception", "doctor", "medical", "cashier"]);
        assert!(patient.registration_done && patient.medicine_done && patient.payment_done);
    }

    #[test]
    fn test_hospital_skips_done_steps() {
        let mut hospital = Hospital::new();
        let mut patient = Patient {
            registration_done: true,
            doctor_check_up_done: true,
            ..Patient::new("returning")
        };
        assert_eq!(hospital.treat(&mut patient).unwrap(), vec!["medical", "cashier"]);

        // Second pass: nothing left to do.
        assert!(hospital.treat(&mut patient).unwrap().is_empty());
        assert!(patient.visits.is_empty());
    }

    fn severity() -> impl Strategy<Value = Severity> {
        prop_oneof![Just(Severity::Low), Just(Severity::Medium), Just(Severity::High)]
    }

    proptest! {
        #[test]
        fn prop_full_desk_routes_to_matching_agent(sev in severity(), text in "[a-z]{1,12}") {
            let mut desk = SupportDesk::new();
            let outcome = desk.submit(Issue::new(sev, text.clone()));
            let expected = format!("{sev} agent");
            prop_assert_eq!(outcome.handled_by(), Some(expected.as_str()));
        }
    }
}
