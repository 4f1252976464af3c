//! End-to-end workbook round trip through the real store, the XLSX
//! codec, and the import/export handlers.

use std::path::PathBuf;
use std::sync::Arc;

use success_plan::adapters::storage::InMemoryPlanStorage;
use success_plan::adapters::workbook::XlsxWorkbook;
use success_plan::application::handlers::{
    ExportPlanCommand, ExportPlanHandler, ImportPlanCommand, ImportPlanHandler,
};
use success_plan::application::PlanStore;
use success_plan::domain::plan::{Objective, ObjectiveStatus, PlanDocument};
use success_plan::ports::PlanState;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn store() -> Arc<PlanStore> {
    Arc::new(PlanStore::open(Arc::new(InMemoryPlanStorage::new())))
}

fn export_to(dir: &std::path::Path, store: Arc<PlanStore>) -> PathBuf {
    let handler = ExportPlanHandler::new(store, Arc::new(XlsxWorkbook::new()));
    handler
        .handle(ExportPlanCommand {
            output_dir: dir.to_path_buf(),
        })
        .expect("export should succeed")
        .path
}

#[test]
fn export_then_reimport_preserves_the_plan() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();

    let source = store();
    let original = source.document();
    let path = export_to(dir.path(), source.clone());
    assert!(path.exists());

    let import = ImportPlanHandler::new(source.clone(), Arc::new(XlsxWorkbook::new()));
    let result = import
        .handle(ImportPlanCommand { path })
        .expect("import should succeed");

    assert!(!result.replaced, "same customer name merges in place");
    assert!(result.report.is_clean(), "skips: {:?}", result.report.skipped);

    let reimported = source.document();
    assert_eq!(reimported.customer_name(), original.customer_name());

    // Objective names and KPI current values survive the trip.
    let names = |doc: &PlanDocument| -> Vec<String> {
        doc.objectives().iter().map(|o| o.name.clone()).collect()
    };
    assert_eq!(names(&reimported), names(&original));

    for (a, b) in original.objectives().iter().zip(reimported.objectives()) {
        let original_values: Vec<f64> = a.kpis.iter().map(|k| k.current_value).collect();
        let reimported_values: Vec<f64> = b.kpis.iter().map(|k| k.current_value).collect();
        assert_eq!(original_values, reimported_values);
    }

    // Stakeholder names survive too.
    let stakeholders: Vec<&str> = reimported
        .stakeholders()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        stakeholders,
        original
            .stakeholders()
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
    );

    // Past objectives keep their archived status.
    assert_eq!(
        reimported.past_objectives().len(),
        original.past_objectives().len()
    );
    assert!(reimported.past_objectives().iter().all(|o| o.is_completed()));
}

#[test]
fn importing_a_different_customers_workbook_replaces_everything() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();

    // Build and export a workbook for a different customer.
    let other_store = store();
    other_store.set_customer_name("Globex").unwrap();
    other_store
        .add_objective(Objective::new("Migrate to Globex platform"))
        .unwrap();
    let path = export_to(dir.path(), other_store);

    // Import it over an edited local plan.
    let local = store();
    local.set_mission_summary("Local only work").unwrap();
    let local_objectives: Vec<_> = local
        .document()
        .objectives()
        .iter()
        .map(|o| o.id)
        .collect();

    let import = ImportPlanHandler::new(local.clone(), Arc::new(XlsxWorkbook::new()));
    let result = import.handle(ImportPlanCommand { path }).unwrap();
    assert!(result.replaced);

    let replaced = local.document();
    assert_eq!(replaced.customer_name(), "Globex");
    // Nothing from the prior plan survives.
    for id in local_objectives {
        assert!(replaced.find_objective(id).is_none());
    }
    assert_ne!(replaced.mission_summary(), "Local only work");
}

#[test]
fn completed_objectives_round_trip_into_the_archive() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();

    let source = store();
    let id = source.document().objectives()[0].id;
    source.complete_objective(id).unwrap();
    let archived = source.document().past_objectives().len();

    let path = export_to(dir.path(), source.clone());
    let import = ImportPlanHandler::new(source.clone(), Arc::new(XlsxWorkbook::new()));
    import.handle(ImportPlanCommand { path }).unwrap();

    let reimported = source.document();
    assert_eq!(reimported.past_objectives().len(), archived);
    assert!(reimported
        .past_objectives()
        .iter()
        .all(|o| o.status == ObjectiveStatus::Completed));
    assert!(reimported.find_objective(id).is_some());
}
