//! Tabular representation of the plan and the export mapper.
//!
//! The plan flattens into four sheets: Overview (key/value pairs),
//! Objectives (current and past merged, tagged by a Type column),
//! Stakeholders, and Value Realized. KPIs collapse into one delimited
//! string per objective: "Label: value; Label: value". Column widths are
//! presentation hints only.

use chrono::NaiveDate;

use crate::domain::foundation::dates::format_date;
use crate::domain::plan::{Kpi, Objective, PlanDocument};

/// Sheet names, fixed so import can find them again.
pub const OVERVIEW_SHEET: &str = "Overview";
pub const OBJECTIVES_SHEET: &str = "Objectives";
pub const STAKEHOLDERS_SHEET: &str = "Stakeholders";
pub const VALUE_SHEET: &str = "Value Realized";

/// A column header with a width hint in character units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub width: u16,
}

impl Column {
    pub fn new(header: impl Into<String>, width: u16) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// One cell of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// The cell rendered as a string, the way import reads it.
    ///
    /// Whole numbers drop their trailing ".0" so "3" survives a trip
    /// through a numeric cell.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => crate::domain::plan::trim_number(*n),
            Cell::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
            Cell::Empty => true,
        }
    }
}

/// A named sheet: headed columns plus rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Index of a column by header name.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    /// Cell of a row under a named header, as a display string.
    pub fn field(&self, row: &[Cell], header: &str) -> String {
        self.column_index(header)
            .and_then(|idx| row.get(idx))
            .map(Cell::display)
            .unwrap_or_default()
    }
}

/// Flattens the document into its four sheets.
pub fn plan_to_sheets(doc: &PlanDocument) -> Vec<Sheet> {
    vec![
        overview_sheet(doc),
        objectives_sheet(doc),
        stakeholders_sheet(doc),
        value_sheet(doc),
    ]
}

fn overview_sheet(doc: &PlanDocument) -> Sheet {
    let mut sheet = Sheet::new(
        OVERVIEW_SHEET,
        vec![Column::new("Field", 25), Column::new("Value", 80)],
    );

    let products = doc
        .products()
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ");

    let kv = |field: &str, value: Cell| vec![Cell::text(field), value];
    sheet.push_row(kv("Customer Name", Cell::text(doc.customer_name())));
    sheet.push_row(kv(
        "Last Updated",
        Cell::text(crate::domain::foundation::dates::format_date_time(
            &doc.last_updated(),
        )),
    ));
    sheet.push_row(kv("Overall Health", Cell::text(doc.plan_health().key())));
    sheet.push_row(kv("Mission Summary", Cell::text(doc.mission_summary())));
    sheet.push_row(kv("Products in Use", Cell::text(products)));
    sheet.push_row(kv(
        "Active Objectives",
        Cell::Number(doc.objectives().len() as f64),
    ));
    sheet.push_row(kv(
        "Completed Objectives",
        Cell::Number(doc.past_objectives().len() as f64),
    ));
    sheet.push_row(kv(
        "Value Items Realized",
        Cell::Number(doc.value_realized().len() as f64),
    ));
    sheet.push_row(kv(
        "Key Stakeholders",
        Cell::Number(doc.stakeholders().len() as f64),
    ));
    sheet.push_row(vec![Cell::Empty, Cell::Empty]);
    sheet.push_row(kv("Mission Goals", Cell::Empty));
    for (index, goal) in doc.mission_goals().iter().enumerate() {
        sheet.push_row(kv(
            &format!("Goal {}", index + 1),
            Cell::text(format!("{}: {}", goal.title, goal.description)),
        ));
    }

    sheet
}

fn objectives_sheet(doc: &PlanDocument) -> Sheet {
    let mut sheet = Sheet::new(
        OBJECTIVES_SHEET,
        vec![
            Column::new("ID", 10),
            Column::new("Name", 30),
            Column::new("Description", 50),
            Column::new("Target Date", 15),
            Column::new("Status", 15),
            Column::new("Challenges", 40),
            Column::new("Next Steps", 40),
            Column::new("KPIs", 30),
            Column::new("Type", 10),
        ],
    );

    let all = doc
        .objectives()
        .iter()
        .map(|o| (o, false))
        .chain(doc.past_objectives().iter().map(|o| (o, true)));

    for (objective, is_past) in all {
        sheet.push_row(objective_row(objective, is_past));
    }
    sheet
}

fn objective_row(objective: &Objective, is_past: bool) -> Vec<Cell> {
    vec![
        Cell::text(objective.id.to_string()),
        Cell::text(&objective.name),
        Cell::text(&objective.description),
        Cell::text(format_date(objective.target_date)),
        Cell::text(objective.status.label()),
        Cell::text(&objective.challenges),
        Cell::text(&objective.next_steps),
        Cell::text(kpi_summary(&objective.kpis)),
        Cell::text(if is_past { "Past" } else { "Current" }),
    ]
}

/// Serializes KPIs as "Label: value<unit>; ..." for the objectives sheet.
pub fn kpi_summary(kpis: &[Kpi]) -> String {
    kpis.iter()
        .map(|kpi| format!("{}: {}", kpi.type_key.label(), kpi.display_value()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn stakeholders_sheet(doc: &PlanDocument) -> Sheet {
    let mut sheet = Sheet::new(
        STAKEHOLDERS_SHEET,
        vec![
            Column::new("Name", 25),
            Column::new("Title", 30),
            Column::new("Email", 35),
            Column::new("Notes", 40),
        ],
    );
    for s in doc.stakeholders() {
        sheet.push_row(vec![
            Cell::text(&s.name),
            Cell::text(&s.title),
            Cell::text(&s.email),
            Cell::text(s.notes.clone().unwrap_or_default()),
        ]);
    }
    sheet
}

fn value_sheet(doc: &PlanDocument) -> Sheet {
    let mut sheet = Sheet::new(
        VALUE_SHEET,
        vec![
            Column::new("Type", 20),
            Column::new("Description", 60),
            Column::new("Date", 15),
            Column::new("Link", 40),
        ],
    );
    for item in doc.value_realized() {
        sheet.push_row(vec![
            Cell::text(item.value_type.label()),
            Cell::text(&item.description),
            Cell::text(format_date(item.date)),
            Cell::text(item.link.clone().unwrap_or_default()),
        ]);
    }
    sheet
}

/// Builds the export file stem: "success-plan-<customer>-<date>" with
/// whitespace collapsed to dashes, lowercased.
pub fn export_file_stem(doc: &PlanDocument, today: NaiveDate) -> String {
    format!(
        "success-plan-{}-{}",
        slug(doc.customer_name()),
        slug(&format_date(Some(today)))
    )
}

fn slug(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
