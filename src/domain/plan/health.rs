//! Plan health, a traffic-light status.
//!
//! Health is either set explicitly for the whole plan or derived from how
//! close an objective's target date is.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Traffic-light indicator for the plan or an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanHealth {
    Green,
    Yellow,
    Red,
}

impl PlanHealth {
    /// Stable key, matching the stored representation.
    pub fn key(&self) -> &'static str {
        match self {
            PlanHealth::Green => "green",
            PlanHealth::Yellow => "yellow",
            PlanHealth::Red => "red",
        }
    }

    /// Display label shown on health pills.
    pub fn label(&self) -> &'static str {
        match self {
            PlanHealth::Green => "Healthy",
            PlanHealth::Yellow => "At Risk",
            PlanHealth::Red => "Critical",
        }
    }

    /// Derives health from a target date, evaluated against today.
    ///
    /// No date reads as healthy. Under 30 days to target is red, under 90
    /// is yellow, anything further out is green.
    pub fn for_target_date(target: Option<NaiveDate>) -> PlanHealth {
        Self::for_target_date_at(target, Utc::now().date_naive())
    }

    /// Date-proximity health against an explicit "today".
    pub fn for_target_date_at(target: Option<NaiveDate>, today: NaiveDate) -> PlanHealth {
        let target = match target {
            Some(t) => t,
            None => return PlanHealth::Green,
        };
        let days = (target - today).num_days();
        if days < 30 {
            PlanHealth::Red
        } else if days < 90 {
            PlanHealth::Yellow
        } else {
            PlanHealth::Green
        }
    }
}

impl Default for PlanHealth {
    fn default() -> Self {
        PlanHealth::Green
    }
}

impl fmt::Display for PlanHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PlanHealth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(PlanHealth::Green),
            "yellow" => Ok(PlanHealth::Yellow),
            "red" => Ok(PlanHealth::Red),
            _ => Err(()),
        }
    }
}
