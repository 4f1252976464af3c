//! Objective entity and its status lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{KpiId, ObjectiveId};

use super::{Kpi, KpiPatch};

/// Lifecycle status of an objective.
///
/// `Completed` is terminal: the document moves completed objectives out of
/// the current collection and into the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "At Risk")]
    AtRisk,
    Completed,
}

impl ObjectiveStatus {
    pub const ALL: [ObjectiveStatus; 4] = [
        ObjectiveStatus::NotStarted,
        ObjectiveStatus::InProgress,
        ObjectiveStatus::AtRisk,
        ObjectiveStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ObjectiveStatus::NotStarted => "Not Started",
            ObjectiveStatus::InProgress => "In Progress",
            ObjectiveStatus::AtRisk => "At Risk",
            ObjectiveStatus::Completed => "Completed",
        }
    }
}

impl Default for ObjectiveStatus {
    fn default() -> Self {
        ObjectiveStatus::NotStarted
    }
}

impl fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ObjectiveStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectiveStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or(())
    }
}

/// A tracked objective with its target date, narrative, and KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: ObjectiveId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ObjectiveStatus,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub next_steps: String,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

impl Objective {
    /// Creates an objective with a fresh id, not yet started, no KPIs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectiveId::new(),
            name: name.into(),
            description: String::new(),
            target_date: None,
            status: ObjectiveStatus::NotStarted,
            challenges: String::new(),
            next_steps: String::new(),
            kpis: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: ObjectiveStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_kpi(mut self, kpi: Kpi) -> Self {
        self.kpis.push(kpi);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == ObjectiveStatus::Completed
    }

    pub fn find_kpi(&self, id: KpiId) -> Option<&Kpi> {
        self.kpis.iter().find(|k| k.id == id)
    }
}

/// Partial update for an objective. Absent fields stay unchanged;
/// `target_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct ObjectivePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_date: Option<Option<NaiveDate>>,
    pub status: Option<ObjectiveStatus>,
    pub challenges: Option<String>,
    pub next_steps: Option<String>,
}

impl ObjectivePatch {
    pub fn status(status: ObjectiveStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(&self, objective: &mut Objective) {
        if let Some(name) = &self.name {
            objective.name = name.clone();
        }
        if let Some(description) = &self.description {
            objective.description = description.clone();
        }
        if let Some(target_date) = self.target_date {
            objective.target_date = target_date;
        }
        if let Some(status) = self.status {
            objective.status = status;
        }
        if let Some(challenges) = &self.challenges {
            objective.challenges = challenges.clone();
        }
        if let Some(next_steps) = &self.next_steps {
            objective.next_steps = next_steps.clone();
        }
    }
}

pub(crate) fn patch_kpi(objective: &mut Objective, kpi_id: KpiId, patch: &KpiPatch) {
    if let Some(kpi) = objective.kpis.iter_mut().find(|k| k.id == kpi_id) {
        patch.apply(kpi);
    }
}
