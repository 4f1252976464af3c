//! Mission goal entity with its ordered custom fields.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FieldId, GoalId};

/// A labeled value attached to a mission goal (links, metrics, dates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: FieldId,
    pub label: String,
    pub value: String,
}

impl CustomField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: FieldId::new(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A long-horizon goal of the success plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionGoal {
    pub id: GoalId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

impl MissionGoal {
    /// Creates a goal with a fresh id and no custom fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: GoalId::new(),
            title: title.into(),
            description: description.into(),
            custom_fields: Vec::new(),
        }
    }

    /// Appends a custom field, preserving order.
    pub fn with_field(mut self, field: CustomField) -> Self {
        self.custom_fields.push(field);
        self
    }
}

/// Partial update for a mission goal.
///
/// `custom_fields` replaces the whole sequence when present, which covers
/// edits, additions, and removals in one shape.
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub custom_fields: Option<Vec<CustomField>>,
}

impl GoalPatch {
    pub(crate) fn apply(&self, goal: &mut MissionGoal) {
        if let Some(title) = &self.title {
            goal.title = title.clone();
        }
        if let Some(description) = &self.description {
            goal.description = description.clone();
        }
        if let Some(fields) = &self.custom_fields {
            goal.custom_fields = fields.clone();
        }
    }
}
