//! PlanDocument aggregate - the single root of one customer's plan.
//!
//! The document is an immutable value: every operation takes `&self` and
//! returns a fresh document with the change applied. The store owns the
//! current instance and is the only writer.
//!
//! Invariants held here:
//! - ids are unique within each collection;
//! - an objective with `Completed` status lives in the past collection,
//!   never the current one;
//! - a directory contact appears at most once in the stakeholder list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{
    GoalId, KpiId, ObjectiveId, StakeholderId, Timestamp, ValidationError, ValueItemId,
};

use super::{
    CustomField, GoalPatch, Kpi, KpiPatch, KpiPeriod, KpiType, MissionGoal, Objective,
    ObjectivePatch, ObjectiveStatus, PlanHealth, Product, Stakeholder, ValueItemPatch,
    ValueRealizedItem, ValueType,
};

/// Errors raised by document operations.
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Stakeholder {0} is already on the plan")]
    DuplicateStakeholder(StakeholderId),

    #[error("Contact {0} is not in the directory")]
    UnknownContact(StakeholderId),
}

/// One customer's success plan.
///
/// Serialized field names follow the stored JSON shape (camelCase), so a
/// document persisted by earlier versions of the editor loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    customer_name: String,
    last_updated: Timestamp,
    mission_summary: String,
    #[serde(default)]
    plan_health: PlanHealth,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    mission_goals: Vec<MissionGoal>,
    #[serde(default)]
    objectives: Vec<Objective>,
    #[serde(default)]
    past_objectives: Vec<Objective>,
    #[serde(default)]
    value_realized: Vec<ValueRealizedItem>,
    #[serde(default)]
    stakeholders: Vec<Stakeholder>,
}

impl PlanDocument {
    /// The seed document restored on first run and on reset.
    pub fn seed() -> Self {
        let adoption = Kpi::new(KpiType::AdoptionRate, 52.0)
            .with_previous(15.0)
            .with_period(KpiPeriod::Quarter);
        let satisfaction = Kpi::new(KpiType::UserSatisfaction, 4.2)
            .with_previous(3.8)
            .with_period(KpiPeriod::Month);
        let answers = Kpi::new(KpiType::AnswerWithAi, 34.0)
            .with_previous(8.0)
            .with_period(KpiPeriod::Quarter);
        let response_time = Kpi::new(KpiType::TimePerResponse, 12.0)
            .with_previous(45.0)
            .with_period(KpiPeriod::Month);
        let utilization = Kpi::new(KpiType::ContentUtilization, 78.0)
            .with_previous(0.0)
            .with_period(KpiPeriod::Quarter);

        let date = |y, m, d| chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap();

        Self {
            customer_name: "TechCorp Solutions".to_string(),
            last_updated: Timestamp::now(),
            mission_summary: "Transform the sales enablement process by implementing an \
                AI-powered platform to reduce content discovery time by 75%, increase sales \
                productivity by 40%, and improve win rates through intelligent content \
                recommendations and real-time analytics."
                .to_string(),
            plan_health: PlanHealth::Green,
            products: vec![
                Product::ResponsiveAi,
                Product::ContentManagement,
                Product::AnalyticsSuite,
            ],
            mission_goals: vec![
                MissionGoal::new(
                    "Content Excellence Initiative",
                    "Achieve 95% content accuracy and reduce obsolete content to less than \
                     5% through AI-powered content management and automated review workflows.",
                )
                .with_field(CustomField::new(
                    "Key Metric",
                    "89% current accuracy, 95% target",
                ))
                .with_field(CustomField::new("Timeline", "Q2 2025 completion")),
                MissionGoal::new(
                    "AI Adoption & Training",
                    "Achieve 80% active user adoption of AI features within sales teams \
                     through training programs and champion networks.",
                )
                .with_field(CustomField::new("Current Adoption", "52% active users")),
            ],
            objectives: vec![
                Objective::new("Q1 Platform Expansion")
                    .with_description(
                        "Complete rollout to EMEA and APAC sales teams (500+ users) with \
                         localized content and regional champion network.",
                    )
                    .with_target_date(date(2025, 3, 31))
                    .with_status(ObjectiveStatus::InProgress)
                    .with_kpi(adoption)
                    .with_kpi(satisfaction),
                Objective::new("AI Response Quality Optimization")
                    .with_description(
                        "Improve AI response accuracy to 95%+ through model fine-tuning, \
                         feedback loops, and content curation.",
                    )
                    .with_target_date(date(2025, 4, 30))
                    .with_status(ObjectiveStatus::InProgress)
                    .with_kpi(answers)
                    .with_kpi(response_time),
            ],
            past_objectives: vec![Objective::new("Platform Onboarding & Initial Setup")
                .with_description(
                    "Onboarded to the platform with SSO integration, initial content \
                     migration, and pilot team training.",
                )
                .with_target_date(date(2024, 12, 31))
                .with_status(ObjectiveStatus::Completed)
                .with_kpi(utilization)],
            value_realized: vec![
                ValueRealizedItem::new(
                    ValueType::TimeSavings,
                    "Sales team saves an average of 6 hours/week per rep through instant \
                     content discovery and AI-powered responses.",
                )
                .with_date(date(2025, 1, 15)),
                ValueRealizedItem::new(
                    ValueType::WinRateIncrease,
                    "Teams using AI-recommended content show 12% higher win rates than the \
                     control group.",
                )
                .with_date(date(2025, 1, 22)),
                ValueRealizedItem::new(
                    ValueType::CostReduction,
                    "Reduced content creation costs by 35% through reuse of \
                     high-performing materials.",
                )
                .with_date(date(2025, 1, 10)),
            ],
            stakeholders: vec![
                seed_stakeholder("Sarah Chen", "VP of Sales", "sarah.chen@techcorp.com"),
                seed_stakeholder(
                    "Michael Rodriguez",
                    "Sales Enablement Director",
                    "michael.rodriguez@techcorp.com",
                ),
                seed_stakeholder("Jennifer Park", "CRO", "jennifer.park@techcorp.com"),
            ],
        }
    }

    /// Builds a document from parts. Used by the import mapper; invariant
    /// normalization (completed objectives belong to the past) is applied.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        customer_name: String,
        mission_summary: String,
        plan_health: PlanHealth,
        products: Vec<Product>,
        mission_goals: Vec<MissionGoal>,
        objectives: Vec<Objective>,
        past_objectives: Vec<Objective>,
        value_realized: Vec<ValueRealizedItem>,
        stakeholders: Vec<Stakeholder>,
    ) -> Self {
        let mut doc = Self {
            customer_name,
            last_updated: Timestamp::now(),
            mission_summary,
            plan_health,
            products,
            mission_goals,
            objectives: Vec::new(),
            past_objectives,
            value_realized,
            stakeholders,
        };
        for objective in objectives {
            if objective.is_completed() {
                doc.past_objectives.push(objective);
            } else {
                doc.objectives.push(objective);
            }
        }
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    pub fn mission_summary(&self) -> &str {
        &self.mission_summary
    }

    pub fn plan_health(&self) -> PlanHealth {
        self.plan_health
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn mission_goals(&self) -> &[MissionGoal] {
        &self.mission_goals
    }

    /// Current (active) objectives.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Completed objectives, most recently archived first.
    pub fn past_objectives(&self) -> &[Objective] {
        &self.past_objectives
    }

    pub fn value_realized(&self) -> &[ValueRealizedItem] {
        &self.value_realized
    }

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    /// KPI types suggested by the products in use. Advisory only.
    pub fn suggested_kpi_types(&self) -> Vec<KpiType> {
        super::suggested_kpi_types(&self.products)
    }

    pub fn find_objective(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives
            .iter()
            .chain(self.past_objectives.iter())
            .find(|o| o.id == id)
    }

    /// Stamps the last-updated time. Only the store commits documents, so
    /// only the store stamps them.
    pub(crate) fn stamped(mut self, ts: Timestamp) -> Self {
        self.last_updated = ts;
        self
    }

    // ───────────────────────────────────────────────────────────────
    // Scalar field groups
    // ───────────────────────────────────────────────────────────────

    pub fn with_customer_name(&self, name: impl Into<String>) -> Self {
        let mut doc = self.clone();
        doc.customer_name = name.into();
        doc
    }

    pub fn with_mission_summary(&self, summary: impl Into<String>) -> Self {
        let mut doc = self.clone();
        doc.mission_summary = summary.into();
        doc
    }

    pub fn with_plan_health(&self, health: PlanHealth) -> Self {
        let mut doc = self.clone();
        doc.plan_health = health;
        doc
    }

    pub fn with_products(&self, products: Vec<Product>) -> Self {
        let mut doc = self.clone();
        doc.products = products;
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // Mission goals
    // ───────────────────────────────────────────────────────────────

    pub fn with_goal_added(&self, goal: MissionGoal) -> Self {
        let mut doc = self.clone();
        doc.mission_goals.push(goal);
        doc
    }

    /// Updates a goal in place; an unknown id is a tolerated no-op.
    pub fn with_goal_updated(&self, id: GoalId, patch: &GoalPatch) -> Self {
        let mut doc = self.clone();
        if let Some(goal) = doc.mission_goals.iter_mut().find(|g| g.id == id) {
            patch.apply(goal);
        }
        doc
    }

    pub fn with_goal_removed(&self, id: GoalId) -> Self {
        let mut doc = self.clone();
        doc.mission_goals.retain(|g| g.id != id);
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // Objectives
    // ───────────────────────────────────────────────────────────────

    /// Adds an objective. One already marked completed goes straight to
    /// the head of the past collection.
    pub fn with_objective_added(&self, objective: Objective) -> Self {
        let mut doc = self.clone();
        if objective.is_completed() {
            doc.past_objectives.insert(0, objective);
        } else {
            doc.objectives.push(objective);
        }
        doc
    }

    /// Applies a patch to an objective in either collection.
    ///
    /// A current objective whose status lands on Completed is moved to
    /// the head of the past collection.
    pub fn with_objective_updated(&self, id: ObjectiveId, patch: &ObjectivePatch) -> Self {
        let mut doc = self.clone();
        if let Some(objective) = doc.objectives.iter_mut().find(|o| o.id == id) {
            patch.apply(objective);
            if objective.is_completed() {
                return doc.with_objective_completed(id);
            }
            return doc;
        }
        if let Some(objective) = doc.past_objectives.iter_mut().find(|o| o.id == id) {
            patch.apply(objective);
        }
        doc
    }

    /// Moves an objective from current to past, prepended so the archive
    /// stays recency-first. Not in the current collection: no-op.
    pub fn with_objective_completed(&self, id: ObjectiveId) -> Self {
        let mut doc = self.clone();
        if let Some(idx) = doc.objectives.iter().position(|o| o.id == id) {
            let mut objective = doc.objectives.remove(idx);
            objective.status = ObjectiveStatus::Completed;
            doc.past_objectives.insert(0, objective);
        }
        doc
    }

    pub fn with_objective_removed(&self, id: ObjectiveId) -> Self {
        let mut doc = self.clone();
        doc.objectives.retain(|o| o.id != id);
        doc.past_objectives.retain(|o| o.id != id);
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // KPIs
    // ───────────────────────────────────────────────────────────────

    pub fn with_kpi_added(&self, objective_id: ObjectiveId, kpi: Kpi) -> Self {
        let mut doc = self.clone();
        if let Some(objective) = doc.objectives.iter_mut().find(|o| o.id == objective_id) {
            objective.kpis.push(kpi);
        }
        doc
    }

    pub fn with_kpi_updated(
        &self,
        objective_id: ObjectiveId,
        kpi_id: KpiId,
        patch: &KpiPatch,
    ) -> Self {
        let mut doc = self.clone();
        if let Some(objective) = doc.objectives.iter_mut().find(|o| o.id == objective_id) {
            super::objective::patch_kpi(objective, kpi_id, patch);
        }
        doc
    }

    pub fn with_kpi_removed(&self, objective_id: ObjectiveId, kpi_id: KpiId) -> Self {
        let mut doc = self.clone();
        if let Some(objective) = doc.objectives.iter_mut().find(|o| o.id == objective_id) {
            objective.kpis.retain(|k| k.id != kpi_id);
        }
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // Stakeholders
    // ───────────────────────────────────────────────────────────────

    /// Adds a stakeholder, rejecting a blank name or a duplicate id.
    pub fn with_stakeholder_added(&self, stakeholder: Stakeholder) -> Result<Self, PlanError> {
        if stakeholder.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if self.stakeholders.iter().any(|s| s.id == stakeholder.id) {
            return Err(PlanError::DuplicateStakeholder(stakeholder.id));
        }
        let mut doc = self.clone();
        doc.stakeholders.push(stakeholder);
        Ok(doc)
    }

    /// Adds a directory contact to the stakeholder list.
    pub fn with_contact_added(&self, id: StakeholderId) -> Result<Self, PlanError> {
        let contact = super::find_contact(id).ok_or(PlanError::UnknownContact(id))?;
        self.with_stakeholder_added(contact.to_stakeholder())
    }

    pub fn with_stakeholder_removed(&self, id: StakeholderId) -> Self {
        let mut doc = self.clone();
        doc.stakeholders.retain(|s| s.id != id);
        doc
    }

    // ───────────────────────────────────────────────────────────────
    // Value realized
    // ───────────────────────────────────────────────────────────────

    pub fn with_value_item_added(&self, item: ValueRealizedItem) -> Self {
        let mut doc = self.clone();
        doc.value_realized.push(item);
        doc
    }

    pub fn with_value_item_updated(&self, id: ValueItemId, patch: &ValueItemPatch) -> Self {
        let mut doc = self.clone();
        if let Some(item) = doc.value_realized.iter_mut().find(|i| i.id == id) {
            patch.apply(item);
        }
        doc
    }

    pub fn with_value_item_removed(&self, id: ValueItemId) -> Self {
        let mut doc = self.clone();
        doc.value_realized.retain(|i| i.id != id);
        doc
    }
}

fn seed_stakeholder(name: &str, title: &str, email: &str) -> Stakeholder {
    Stakeholder {
        id: StakeholderId::new(),
        name: name.to_string(),
        title: title.to_string(),
        email: email.to_string(),
        notes: None,
    }
}
