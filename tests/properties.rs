//! Property tests for the delta math and the unique-id invariant.

use proptest::prelude::*;

use std::sync::Arc;

use success_plan::adapters::storage::InMemoryPlanStorage;
use success_plan::application::PlanStore;
use success_plan::domain::plan::{
    delta_percent, Kpi, KpiType, MissionGoal, Objective, PlanDocument, Stakeholder,
    ValueRealizedItem, ValueType,
};
use success_plan::ports::PlanState;

proptest! {
    #[test]
    fn delta_is_zero_without_a_usable_previous(current in -1e6f64..1e6) {
        prop_assert_eq!(delta_percent(current, None), 0.0);
        prop_assert_eq!(delta_percent(current, Some(0.0)), 0.0);
    }

    #[test]
    fn delta_sign_tracks_direction_of_change(
        current in -1e6f64..1e6,
        previous in prop::num::f64::NORMAL.prop_filter("nonzero", |p| p.abs() > 1e-6 && p.abs() < 1e6),
    ) {
        let delta = delta_percent(current, Some(previous));
        if current > previous {
            prop_assert!(delta >= 0.0);
        } else if current < previous {
            prop_assert!(delta <= 0.0);
        }
    }

    #[test]
    fn delta_is_rounded_to_one_decimal(
        current in -1e4f64..1e4,
        previous in 1e-2f64..1e4,
    ) {
        let delta = delta_percent(current, Some(previous));
        let tenths = delta * 10.0;
        prop_assert!((tenths - tenths.round()).abs() < 1e-6);
    }
}

fn assert_unique_ids(doc: &PlanDocument) {
    let mut objective_ids: Vec<_> = doc
        .objectives()
        .iter()
        .chain(doc.past_objectives().iter())
        .map(|o| o.id)
        .collect();
    objective_ids.sort_by_key(|id| id.to_string());
    objective_ids.dedup();
    assert_eq!(
        objective_ids.len(),
        doc.objectives().len() + doc.past_objectives().len(),
        "duplicate objective id"
    );

    let mut stakeholder_ids: Vec<_> = doc.stakeholders().iter().map(|s| s.id).collect();
    stakeholder_ids.sort_by_key(|id| id.to_string());
    stakeholder_ids.dedup();
    assert_eq!(stakeholder_ids.len(), doc.stakeholders().len());

    let mut goal_ids: Vec<_> = doc.mission_goals().iter().map(|g| g.id).collect();
    goal_ids.sort_by_key(|id| id.to_string());
    goal_ids.dedup();
    assert_eq!(goal_ids.len(), doc.mission_goals().len());

    let mut value_ids: Vec<_> = doc.value_realized().iter().map(|v| v.id).collect();
    value_ids.sort_by_key(|id| id.to_string());
    value_ids.dedup();
    assert_eq!(value_ids.len(), doc.value_realized().len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn no_add_sequence_produces_duplicate_ids(ops in prop::collection::vec(0u8..5, 1..40)) {
        let store = PlanStore::open(Arc::new(InMemoryPlanStorage::new()));

        for (index, op) in ops.iter().enumerate() {
            match op {
                0 => {
                    store.add_objective(Objective::new(format!("Objective {index}"))).unwrap();
                }
                1 => {
                    store.add_goal(MissionGoal::new(format!("Goal {index}"), "")).unwrap();
                }
                2 => {
                    let stakeholder =
                        Stakeholder::new(format!("Person {index}"), "", "").unwrap();
                    store.add_stakeholder(stakeholder).unwrap();
                }
                3 => {
                    store
                        .add_value_item(ValueRealizedItem::new(
                            ValueType::TimeSavings,
                            format!("Value {index}"),
                        ))
                        .unwrap();
                }
                _ => {
                    let objective_id = store.document().objectives()[0].id;
                    store
                        .add_kpi(objective_id, Kpi::new(KpiType::AdoptionRate, index as f64))
                        .unwrap();
                }
            }
        }

        assert_unique_ids(&store.document());
    }
}
