//! Import mapper: four sheets back into a plan.
//!
//! Parsing is forgiving at row level and strict at file level. Rows
//! missing required fields are skipped, KPI segments that fail the
//! "label: numeric" pattern are dropped, and unparseable dates become
//! absent dates. Every skip is recorded in the [`ImportReport`] so the
//! caller can surface what the mapper quietly left out.

use std::str::FromStr;

use crate::domain::foundation::dates::parse_flexible;
use crate::domain::foundation::{ObjectiveId, Timestamp};
use crate::domain::plan::{
    Kpi, KpiPeriod, KpiType, MissionGoal, Objective, ObjectiveStatus, PlanDocument, PlanHealth,
    Product, Stakeholder, ValueRealizedItem, ValueType,
};

use super::sheets::{
    Sheet, OBJECTIVES_SHEET, OVERVIEW_SHEET, STAKEHOLDERS_SHEET, VALUE_SHEET,
};

/// Plan fields recovered from a workbook.
///
/// Scalars and collections are optional: a sheet that is absent from the
/// workbook leaves its fields untouched during a merge instead of
/// clobbering them with empties.
#[derive(Debug, Clone, Default)]
pub struct ImportedPlan {
    pub customer_name: Option<String>,
    pub mission_summary: Option<String>,
    pub plan_health: Option<PlanHealth>,
    pub products: Option<Vec<Product>>,
    pub mission_goals: Option<Vec<MissionGoal>>,
    pub objectives: Option<Vec<Objective>>,
    pub past_objectives: Option<Vec<Objective>>,
    pub stakeholders: Option<Vec<Stakeholder>>,
    pub value_realized: Option<Vec<ValueRealizedItem>>,
}

/// One row or segment the import left out, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub sheet: String,
    /// Zero-based data row index within the sheet.
    pub row: usize,
    pub reason: String,
}

/// What the import dropped on the floor.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub skipped: Vec<SkippedEntry>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn skip(&mut self, sheet: &str, row: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedEntry {
            sheet: sheet.to_string(),
            row,
            reason: reason.into(),
        });
    }
}

/// Parses the four sheets into plan fields plus a skip report.
pub fn sheets_to_plan(sheets: &[Sheet]) -> (ImportedPlan, ImportReport) {
    let mut imported = ImportedPlan::default();
    let mut report = ImportReport::default();

    if let Some(sheet) = find_sheet(sheets, OVERVIEW_SHEET) {
        parse_overview(sheet, &mut imported, &mut report);
    }
    if let Some(sheet) = find_sheet(sheets, OBJECTIVES_SHEET) {
        parse_objectives(sheet, &mut imported, &mut report);
    }
    if let Some(sheet) = find_sheet(sheets, STAKEHOLDERS_SHEET) {
        parse_stakeholders(sheet, &mut imported, &mut report);
    }
    if let Some(sheet) = find_sheet(sheets, VALUE_SHEET) {
        parse_value_realized(sheet, &mut imported, &mut report);
    }

    (imported, report)
}

fn find_sheet<'a>(sheets: &'a [Sheet], name: &str) -> Option<&'a Sheet> {
    sheets.iter().find(|s| s.name == name)
}

fn parse_overview(sheet: &Sheet, imported: &mut ImportedPlan, report: &mut ImportReport) {
    let mut goals = Vec::new();

    for (index, row) in sheet.rows.iter().enumerate() {
        let field = sheet.field(row, "Field");
        let value = sheet.field(row, "Value");
        if field.is_empty() {
            continue;
        }

        match field.as_str() {
            "Customer Name" => imported.customer_name = Some(value),
            "Mission Summary" => imported.mission_summary = Some(value),
            "Overall Health" => match PlanHealth::from_str(&value) {
                Ok(health) => imported.plan_health = Some(health),
                Err(()) => report.skip(
                    OVERVIEW_SHEET,
                    index,
                    format!("unknown health '{value}'"),
                ),
            },
            "Products in Use" => {
                let mut products = Vec::new();
                for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    match Product::from_label(token) {
                        Some(product) => products.push(product),
                        None => report.skip(
                            OVERVIEW_SHEET,
                            index,
                            format!("unknown product '{token}'"),
                        ),
                    }
                }
                imported.products = Some(products);
            }
            other if other.starts_with("Goal ") => {
                if value.is_empty() {
                    continue;
                }
                match value.split_once(':') {
                    Some((title, description)) => goals.push(MissionGoal::new(
                        title.trim(),
                        description.trim(),
                    )),
                    None => report.skip(
                        OVERVIEW_SHEET,
                        index,
                        "goal row without 'Title: description' shape",
                    ),
                }
            }
            // Last Updated and the count rows are derived on export and
            // ignored on import.
            _ => {}
        }
    }

    if !goals.is_empty() {
        imported.mission_goals = Some(goals);
    }
}

fn parse_objectives(sheet: &Sheet, imported: &mut ImportedPlan, report: &mut ImportReport) {
    let mut current = Vec::new();
    let mut past = Vec::new();

    for (index, row) in sheet.rows.iter().enumerate() {
        let name = sheet.field(row, "Name");
        if name.trim().is_empty() {
            report.skip(OBJECTIVES_SHEET, index, "objective without a name");
            continue;
        }

        let mut objective = Objective::new(name);
        // Re-imported rows keep their id when the cell still parses.
        if let Ok(id) = sheet.field(row, "ID").parse::<ObjectiveId>() {
            objective.id = id;
        }
        objective.description = sheet.field(row, "Description");
        objective.target_date = parse_flexible(&sheet.field(row, "Target Date"));
        objective.status = sheet
            .field(row, "Status")
            .parse()
            .unwrap_or(ObjectiveStatus::NotStarted);
        objective.challenges = sheet.field(row, "Challenges");
        objective.next_steps = sheet.field(row, "Next Steps");
        objective.kpis = parse_kpi_summary(
            &sheet.field(row, "KPIs"),
            index,
            report,
        );

        // The Type column decides the collection; a Completed status
        // archives the row regardless so the invariant holds either way.
        let tagged_past = sheet.field(row, "Type") == "Past";
        if tagged_past || objective.is_completed() {
            objective.status = ObjectiveStatus::Completed;
            past.push(objective);
        } else {
            current.push(objective);
        }
    }

    imported.objectives = Some(current);
    imported.past_objectives = Some(past);
}

/// Parses "Label: value; Label: value" back into KPIs.
///
/// Each segment must end in a plain non-negative number and its label
/// must match the KPI catalog exactly; anything else drops the segment.
/// Previous values and periods do not round-trip: imports compare
/// nothing and default to quarterly.
fn parse_kpi_summary(summary: &str, row: usize, report: &mut ImportReport) -> Vec<Kpi> {
    let mut kpis = Vec::new();
    for segment in summary.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let parsed = segment.rsplit_once(':').and_then(|(label, value)| {
            let value = parse_kpi_value(value.trim())?;
            let type_key = KpiType::from_label(label.trim())?;
            Some((type_key, value))
        });
        match parsed {
            Some((type_key, value)) => {
                let mut kpi = Kpi::new(type_key, value);
                kpi.compare_previous = false;
                kpi.period = KpiPeriod::Quarter;
                kpis.push(kpi);
            }
            None => report.skip(
                OBJECTIVES_SHEET,
                row,
                format!("unparseable KPI segment '{segment}'"),
            ),
        }
    }
    kpis
}

/// Accepts digits with at most one decimal point, with an optional unit
/// suffix after the digits ("52%", "12s", "4.2/5").
fn parse_kpi_value(input: &str) -> Option<f64> {
    let digits: String = input
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() || digits.matches('.').count() > 1 {
        return None;
    }
    digits.parse().ok()
}

fn parse_stakeholders(sheet: &Sheet, imported: &mut ImportedPlan, report: &mut ImportReport) {
    let mut stakeholders = Vec::new();
    for (index, row) in sheet.rows.iter().enumerate() {
        let name = sheet.field(row, "Name");
        if name.trim().is_empty() {
            report.skip(STAKEHOLDERS_SHEET, index, "stakeholder without a name");
            continue;
        }
        let notes = sheet.field(row, "Notes");
        match Stakeholder::new(name, sheet.field(row, "Title"), sheet.field(row, "Email")) {
            Ok(mut stakeholder) => {
                if !notes.is_empty() {
                    stakeholder.notes = Some(notes);
                }
                stakeholders.push(stakeholder);
            }
            Err(err) => report.skip(STAKEHOLDERS_SHEET, index, err.to_string()),
        }
    }
    imported.stakeholders = Some(stakeholders);
}

fn parse_value_realized(sheet: &Sheet, imported: &mut ImportedPlan, report: &mut ImportReport) {
    let mut items = Vec::new();
    for (index, row) in sheet.rows.iter().enumerate() {
        let type_label = sheet.field(row, "Type");
        let description = sheet.field(row, "Description");
        if type_label.is_empty() || description.is_empty() {
            report.skip(VALUE_SHEET, index, "value row without type and description");
            continue;
        }
        let value_type = match ValueType::from_label(&type_label) {
            Some(t) => t,
            None => {
                report.skip(
                    VALUE_SHEET,
                    index,
                    format!("unknown value type '{type_label}'"),
                );
                continue;
            }
        };

        let mut item = ValueRealizedItem::new(value_type, description);
        item.date = parse_flexible(&sheet.field(row, "Date"));
        let link = sheet.field(row, "Link");
        if !link.is_empty() {
            item.link = Some(link);
        }
        items.push(item);
    }
    imported.value_realized = Some(items);
}

/// Applies the import merge policy.
///
/// A customer name that differs from the current document's discards the
/// whole current plan and rebuilds from the import. Otherwise the import
/// wins field by field where it has data. The result carries a fresh
/// `last_updated` either way.
pub fn merge_imported(current: &PlanDocument, imported: ImportedPlan) -> PlanDocument {
    let replacing = imported
        .customer_name
        .as_deref()
        .is_some_and(|name| name != current.customer_name());

    let merged = if replacing {
        PlanDocument::from_parts(
            imported.customer_name.unwrap_or_default(),
            imported.mission_summary.unwrap_or_default(),
            imported.plan_health.unwrap_or_default(),
            imported.products.unwrap_or_default(),
            imported.mission_goals.unwrap_or_default(),
            imported.objectives.unwrap_or_default(),
            imported.past_objectives.unwrap_or_default(),
            imported.value_realized.unwrap_or_default(),
            imported.stakeholders.unwrap_or_default(),
        )
    } else {
        PlanDocument::from_parts(
            imported
                .customer_name
                .unwrap_or_else(|| current.customer_name().to_string()),
            imported
                .mission_summary
                .unwrap_or_else(|| current.mission_summary().to_string()),
            imported.plan_health.unwrap_or(current.plan_health()),
            imported.products.unwrap_or_else(|| current.products().to_vec()),
            imported
                .mission_goals
                .unwrap_or_else(|| current.mission_goals().to_vec()),
            imported
                .objectives
                .unwrap_or_else(|| current.objectives().to_vec()),
            imported
                .past_objectives
                .unwrap_or_else(|| current.past_objectives().to_vec()),
            imported
                .value_realized
                .unwrap_or_else(|| current.value_realized().to_vec()),
            imported
                .stakeholders
                .unwrap_or_else(|| current.stakeholders().to_vec()),
        )
    };

    merged.stamped(Timestamp::now())
}
