//! Peanut cultivar models

use serde::{Deserialize, Serialize};

/// Peanut cultivars tracked by the calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cultivar {
    Granoleico,
    Iac503,
    Iac677,
    IacOl3,
    /// Any cultivar outside the tracked list, labeled free-form
    Other(String),
}

impl std::fmt::Display for Cultivar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cultivar::Granoleico => write!(f, "Granoleico"),
            Cultivar::Iac503 => write!(f, "IAC 503"),
            Cultivar::Iac677 => write!(f, "IAC 677"),
            Cultivar::IacOl3 => write!(f, "IAC OL3"),
            Cultivar::Other(name) => write!(f, "{}", name),
        }
    }
}
