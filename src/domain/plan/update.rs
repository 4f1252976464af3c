//! Typed plan updates.
//!
//! The editor's mutations form a closed set. Each variant maps to one
//! copy-on-write operation on [`PlanDocument`]; the store applies a
//! variant, stamps the result, persists it, and notifies subscribers.

use crate::domain::foundation::{GoalId, KpiId, ObjectiveId, StakeholderId, ValueItemId};

use super::{
    GoalPatch, Kpi, KpiPatch, MissionGoal, Objective, ObjectivePatch, PlanDocument, PlanError,
    PlanHealth, Product, Stakeholder, ValueItemPatch, ValueRealizedItem,
};

/// A single mutation of the plan document.
#[derive(Debug, Clone)]
pub enum PlanUpdate {
    SetCustomerName(String),
    SetMissionSummary(String),
    SetPlanHealth(PlanHealth),
    SetProducts(Vec<Product>),

    AddGoal(MissionGoal),
    UpdateGoal { id: GoalId, patch: GoalPatch },
    RemoveGoal(GoalId),

    AddObjective(Objective),
    UpdateObjective {
        id: ObjectiveId,
        patch: ObjectivePatch,
    },
    RemoveObjective(ObjectiveId),
    CompleteObjective(ObjectiveId),

    AddKpi {
        objective: ObjectiveId,
        kpi: Kpi,
    },
    UpdateKpi {
        objective: ObjectiveId,
        kpi: KpiId,
        patch: KpiPatch,
    },
    RemoveKpi {
        objective: ObjectiveId,
        kpi: KpiId,
    },

    AddStakeholder(Stakeholder),
    AddContact(StakeholderId),
    RemoveStakeholder(StakeholderId),

    AddValueItem(ValueRealizedItem),
    UpdateValueItem {
        id: ValueItemId,
        patch: ValueItemPatch,
    },
    RemoveValueItem(ValueItemId),

    /// Wholesale replacement, used by import and reset.
    Replace(Box<PlanDocument>),
}

impl PlanDocument {
    /// Applies a typed update, producing the next document value.
    ///
    /// Fallible variants (stakeholder validation) leave the receiver
    /// untouched on error.
    pub fn apply(&self, update: PlanUpdate) -> Result<PlanDocument, PlanError> {
        let next = match update {
            PlanUpdate::SetCustomerName(name) => self.with_customer_name(name),
            PlanUpdate::SetMissionSummary(summary) => self.with_mission_summary(summary),
            PlanUpdate::SetPlanHealth(health) => self.with_plan_health(health),
            PlanUpdate::SetProducts(products) => self.with_products(products),

            PlanUpdate::AddGoal(goal) => self.with_goal_added(goal),
            PlanUpdate::UpdateGoal { id, patch } => self.with_goal_updated(id, &patch),
            PlanUpdate::RemoveGoal(id) => self.with_goal_removed(id),

            PlanUpdate::AddObjective(objective) => self.with_objective_added(objective),
            PlanUpdate::UpdateObjective { id, patch } => self.with_objective_updated(id, &patch),
            PlanUpdate::RemoveObjective(id) => self.with_objective_removed(id),
            PlanUpdate::CompleteObjective(id) => self.with_objective_completed(id),

            PlanUpdate::AddKpi { objective, kpi } => self.with_kpi_added(objective, kpi),
            PlanUpdate::UpdateKpi {
                objective,
                kpi,
                patch,
            } => self.with_kpi_updated(objective, kpi, &patch),
            PlanUpdate::RemoveKpi { objective, kpi } => self.with_kpi_removed(objective, kpi),

            PlanUpdate::AddStakeholder(stakeholder) => self.with_stakeholder_added(stakeholder)?,
            PlanUpdate::AddContact(id) => self.with_contact_added(id)?,
            PlanUpdate::RemoveStakeholder(id) => self.with_stakeholder_removed(id),

            PlanUpdate::AddValueItem(item) => self.with_value_item_added(item),
            PlanUpdate::UpdateValueItem { id, patch } => self.with_value_item_updated(id, &patch),
            PlanUpdate::RemoveValueItem(id) => self.with_value_item_removed(id),

            PlanUpdate::Replace(document) => *document,
        };
        Ok(next)
    }
}
