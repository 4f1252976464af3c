//! PlanStore - the owning state holder for the plan document.
//!
//! Constructed explicitly by the host and handed to handlers through the
//! [`PlanState`] port. Every commit stamps `last_updated`, persists the
//! JSON document through the storage port, then synchronously notifies
//! subscribers. Persistence problems degrade to in-memory state with a
//! log line; they never fail an edit.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{
    GoalId, KpiId, ObjectiveId, StakeholderId, SubscriptionId, Timestamp, ValueItemId,
};
use crate::domain::plan::{
    GoalPatch, Kpi, KpiPatch, MissionGoal, Objective, ObjectivePatch, PlanDocument, PlanHealth,
    PlanUpdate, Product, Stakeholder, ValueItemPatch, ValueRealizedItem,
};
use crate::ports::{PlanListener, PlanState, PlanStorage, ResetConfirmation, StoreError};

const RESET_PROMPT: &str = "Are you sure you want to reset all data? This cannot be undone.";

/// The single owner of the plan document.
pub struct PlanStore {
    storage: Arc<dyn PlanStorage>,
    document: Mutex<PlanDocument>,
    listeners: Mutex<Vec<(SubscriptionId, PlanListener)>>,
}

impl PlanStore {
    /// Opens the store, loading any previously persisted document.
    ///
    /// Stored JSON is shallow-merged over the seed document so fields
    /// introduced by newer seeds are not lost on old saves. A read
    /// failure or corrupt JSON falls back to the seed.
    pub fn open(storage: Arc<dyn PlanStorage>) -> Self {
        let document = match storage.read() {
            Ok(Some(json)) => match merge_over_seed(&json) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::error!(error = %err, "Stored plan is corrupt, falling back to seed");
                    PlanDocument::seed()
                }
            },
            Ok(None) => PlanDocument::seed(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load stored plan, falling back to seed");
                PlanDocument::seed()
            }
        };

        Self {
            storage,
            document: Mutex::new(document),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Stamps, persists, and publishes a new document value.
    fn commit(&self, next: PlanDocument) -> PlanDocument {
        let mut guard = self.document.lock().unwrap();

        // Strictly monotonic even if two commits land in the same tick.
        let previous = guard.last_updated();
        let mut now = Timestamp::now();
        if !previous.is_before(&now) {
            now = previous.plus_millis(1);
        }
        let next = next.stamped(now);
        *guard = next.clone();
        drop(guard);

        match serde_json::to_string(&next) {
            Ok(json) => {
                if let Err(err) = self.storage.write(&json) {
                    tracing::warn!(error = %err, "Failed to persist plan, continuing in memory");
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize plan for persistence");
            }
        }

        let listeners = self.listeners.lock().unwrap();
        for (_, listener) in listeners.iter() {
            listener(&next);
        }
        drop(listeners);

        next
    }

    // ───────────────────────────────────────────────────────────────
    // Entity conveniences, all thin wrappers over `update`
    // ───────────────────────────────────────────────────────────────

    pub fn set_customer_name(&self, name: impl Into<String>) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::SetCustomerName(name.into()))
    }

    pub fn set_mission_summary(
        &self,
        summary: impl Into<String>,
    ) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::SetMissionSummary(summary.into()))
    }

    pub fn set_plan_health(&self, health: PlanHealth) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::SetPlanHealth(health))
    }

    pub fn set_products(&self, products: Vec<Product>) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::SetProducts(products))
    }

    pub fn add_goal(&self, goal: MissionGoal) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddGoal(goal))
    }

    pub fn update_goal(&self, id: GoalId, patch: GoalPatch) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::UpdateGoal { id, patch })
    }

    pub fn remove_goal(&self, id: GoalId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::RemoveGoal(id))
    }

    pub fn add_objective(&self, objective: Objective) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddObjective(objective))
    }

    pub fn update_objective(
        &self,
        id: ObjectiveId,
        patch: ObjectivePatch,
    ) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::UpdateObjective { id, patch })
    }

    pub fn remove_objective(&self, id: ObjectiveId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::RemoveObjective(id))
    }

    pub fn complete_objective(&self, id: ObjectiveId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::CompleteObjective(id))
    }

    pub fn add_kpi(&self, objective: ObjectiveId, kpi: Kpi) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddKpi { objective, kpi })
    }

    pub fn update_kpi(
        &self,
        objective: ObjectiveId,
        kpi: KpiId,
        patch: KpiPatch,
    ) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::UpdateKpi {
            objective,
            kpi,
            patch,
        })
    }

    pub fn remove_kpi(
        &self,
        objective: ObjectiveId,
        kpi: KpiId,
    ) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::RemoveKpi { objective, kpi })
    }

    pub fn add_stakeholder(&self, stakeholder: Stakeholder) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddStakeholder(stakeholder))
    }

    /// Adds a directory contact; at most one copy can be on the plan.
    pub fn add_contact(&self, id: StakeholderId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddContact(id))
    }

    pub fn remove_stakeholder(&self, id: StakeholderId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::RemoveStakeholder(id))
    }

    pub fn add_value_item(&self, item: ValueRealizedItem) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::AddValueItem(item))
    }

    pub fn update_value_item(
        &self,
        id: ValueItemId,
        patch: ValueItemPatch,
    ) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::UpdateValueItem { id, patch })
    }

    pub fn remove_value_item(&self, id: ValueItemId) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::RemoveValueItem(id))
    }

    /// Wholesale replacement, used by the import handler.
    pub fn replace(&self, document: PlanDocument) -> Result<PlanDocument, StoreError> {
        self.update(PlanUpdate::Replace(Box::new(document)))
    }
}

impl PlanState for PlanStore {
    fn document(&self) -> PlanDocument {
        self.document.lock().unwrap().clone()
    }

    fn update(&self, update: PlanUpdate) -> Result<PlanDocument, StoreError> {
        let current = self.document();
        let next = current.apply(update)?;
        Ok(self.commit(next))
    }

    fn subscribe(&self, listener: PlanListener) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.lock().unwrap().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    fn reset(&self, confirmation: &dyn ResetConfirmation) -> Result<bool, StoreError> {
        if !confirmation.confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.commit(PlanDocument::seed());
        Ok(true)
    }
}

/// Shallow-merges stored JSON over the seed document, field by field at
/// the top level, so old saves pick up fields newer seeds introduce.
fn merge_over_seed(json: &str) -> Result<PlanDocument, serde_json::Error> {
    let stored: serde_json::Value = serde_json::from_str(json)?;
    let mut base = serde_json::to_value(PlanDocument::seed())?;

    if let (serde_json::Value::Object(base_map), serde_json::Value::Object(stored_map)) =
        (&mut base, stored)
    {
        for (key, value) in stored_map {
            base_map.insert(key, value);
        }
    }

    serde_json::from_value(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryPlanStorage;
    use crate::domain::plan::{KpiType, ObjectiveStatus};
    use crate::ports::StorageError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingStorage;

    impl PlanStorage for FailingStorage {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::unavailable("simulated"))
        }

        fn write(&self, _json: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("simulated"))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::unavailable("simulated"))
        }
    }

    struct Confirm(bool);

    impl ResetConfirmation for Confirm {
        fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    fn store() -> PlanStore {
        PlanStore::open(Arc::new(InMemoryPlanStorage::new()))
    }

    #[test]
    fn update_lands_values_and_advances_last_updated() {
        let store = store();
        let before = store.document().last_updated();

        let doc = store.set_customer_name("Acme Corp").unwrap();

        assert_eq!(doc.customer_name(), "Acme Corp");
        assert!(doc.last_updated().is_after(&before));
        assert_eq!(store.document().customer_name(), "Acme Corp");
    }

    #[test]
    fn last_updated_is_strictly_monotonic_across_rapid_updates() {
        let store = store();
        let mut previous = store.document().last_updated();
        for i in 0..20 {
            let doc = store.set_mission_summary(format!("rev {i}")).unwrap();
            assert!(doc.last_updated().is_after(&previous));
            previous = doc.last_updated();
        }
    }

    #[test]
    fn identical_updates_are_idempotent_apart_from_the_stamp() {
        let store = store();
        let once = store.set_mission_summary("same").unwrap();
        let twice = store.set_mission_summary("same").unwrap();

        let mut once_value = serde_json::to_value(&once).unwrap();
        let mut twice_value = serde_json::to_value(&twice).unwrap();
        once_value.as_object_mut().unwrap().remove("lastUpdated");
        twice_value.as_object_mut().unwrap().remove("lastUpdated");
        assert_eq!(once_value, twice_value);
    }

    #[test]
    fn every_commit_is_persisted() {
        let storage = Arc::new(InMemoryPlanStorage::new());
        let store = PlanStore::open(storage.clone());

        store.set_customer_name("Persisted Inc").unwrap();

        let json = storage.read().unwrap().unwrap();
        let stored: PlanDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(stored.customer_name(), "Persisted Inc");
    }

    #[test]
    fn subscribers_fire_synchronously_with_the_new_document() {
        let store = store();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(String::new()));

        let count_clone = count.clone();
        let seen_clone = seen.clone();
        let id = store.subscribe(Box::new(move |doc| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            *seen_clone.lock().unwrap() = doc.customer_name().to_string();
        }));

        store.set_customer_name("Notified Co").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(&*seen.lock().unwrap(), "Notified Co");

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_customer_name("Silent Co").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn validation_failure_changes_nothing_and_notifies_nobody() {
        let store = store();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        store.subscribe(Box::new(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let before = store.document();
        let duplicate = before.stakeholders()[0].clone();
        let result = store.add_stakeholder(duplicate);

        assert!(result.is_err());
        assert_eq!(store.document(), before);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn persistence_failure_degrades_to_in_memory() {
        let store = PlanStore::open(Arc::new(FailingStorage));

        let doc = store.set_customer_name("Memory Only").unwrap();

        assert_eq!(doc.customer_name(), "Memory Only");
        assert_eq!(store.document().customer_name(), "Memory Only");
    }

    #[test]
    fn corrupt_stored_json_falls_back_to_seed() {
        let storage = Arc::new(InMemoryPlanStorage::new());
        storage.write("{not json").unwrap();

        let store = PlanStore::open(storage);
        assert_eq!(store.document().customer_name(), "TechCorp Solutions");
    }

    #[test]
    fn stored_document_survives_reopen() {
        let storage = Arc::new(InMemoryPlanStorage::new());
        let store = PlanStore::open(storage.clone());
        store.set_customer_name("Reopened Ltd").unwrap();
        drop(store);

        let reopened = PlanStore::open(storage);
        assert_eq!(reopened.document().customer_name(), "Reopened Ltd");
    }

    #[test]
    fn partial_stored_json_merges_over_seed_defaults() {
        let storage = Arc::new(InMemoryPlanStorage::new());
        storage
            .write(r#"{"customerName":"Old Save Co","lastUpdated":"2024-01-01T00:00:00Z","missionSummary":"from storage"}"#)
            .unwrap();

        let store = PlanStore::open(storage);
        let doc = store.document();

        assert_eq!(doc.customer_name(), "Old Save Co");
        assert_eq!(doc.mission_summary(), "from storage");
        // Fields missing from the old save keep their seed values.
        assert!(!doc.objectives().is_empty());
        assert!(!doc.stakeholders().is_empty());
    }

    #[test]
    fn completing_an_objective_through_the_store() {
        let store = store();
        let id = store.document().objectives()[0].id;

        let doc = store
            .update_objective(id, ObjectivePatch::status(ObjectiveStatus::Completed))
            .unwrap();

        assert!(doc.objectives().iter().all(|o| o.id != id));
        assert_eq!(doc.past_objectives()[0].id, id);
    }

    #[test]
    fn reset_requires_confirmation() {
        let store = store();
        store.set_customer_name("Edited Co").unwrap();

        assert!(!store.reset(&Confirm(false)).unwrap());
        assert_eq!(store.document().customer_name(), "Edited Co");

        assert!(store.reset(&Confirm(true)).unwrap());
        assert_eq!(store.document().customer_name(), "TechCorp Solutions");
    }

    #[test]
    fn kpi_lifecycle_through_the_store() {
        let store = store();
        let objective_id = store.document().objectives()[0].id;
        let kpi = Kpi::new(KpiType::RevenueImpact, 2.1);
        let kpi_id = kpi.id;

        store.add_kpi(objective_id, kpi).unwrap();
        store
            .update_kpi(
                objective_id,
                kpi_id,
                KpiPatch {
                    current_value: Some(5.0),
                    ..KpiPatch::default()
                },
            )
            .unwrap();

        let doc = store.document();
        let stored = doc.objectives()[0].find_kpi(kpi_id).unwrap();
        assert_eq!(stored.current_value, 5.0);

        let doc = store.remove_kpi(objective_id, kpi_id).unwrap();
        assert!(doc.objectives()[0].find_kpi(kpi_id).is_none());
    }
}
