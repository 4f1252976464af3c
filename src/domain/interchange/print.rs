//! Print mapper: the plan as a paginated document tree.
//!
//! The tree carries page-break hints alongside content so the renderer
//! can keep cards whole and start the archive on a fresh page. Mapping
//! only; no business rules live here.

use chrono::Utc;

use crate::domain::foundation::dates::{format_date, format_date_time, relative_time};
use crate::domain::plan::{Kpi, KpiPeriod, Objective, PlanDocument, PlanHealth};

/// How a section or card may break across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakHint {
    /// No constraint.
    None,
    /// Keep the region on one page when possible.
    AvoidInside,
    /// Force a page break before the region.
    PageBefore,
}

/// A complete plan ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub title: String,
    pub customer_name: String,
    pub last_updated: String,
    pub sections: Vec<PrintSection>,
}

/// A headed region of the printed plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintSection {
    pub heading: String,
    pub break_hint: BreakHint,
    pub blocks: Vec<PrintBlock>,
}

/// Content blocks inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintBlock {
    Paragraph(String),
    HealthBadge(PlanHealth),
    Card(PrintCard),
}

/// A bordered card, kept whole across page breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintCard {
    pub title: String,
    pub subtitle: Option<String>,
    pub lines: Vec<String>,
    pub kpis: Vec<KpiTile>,
}

/// One KPI tile with its optional delta badge.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
    pub delta: Option<DeltaBadge>,
}

/// Period-over-period change annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaBadge {
    pub percent: f64,
    pub improved: bool,
    pub period: KpiPeriod,
}

/// Maps the document to its printable tree.
pub fn plan_to_print(doc: &PlanDocument) -> PrintDocument {
    let mut sections = vec![
        PrintSection {
            heading: "Mission Summary".to_string(),
            break_hint: BreakHint::AvoidInside,
            blocks: vec![PrintBlock::Paragraph(doc.mission_summary().to_string())],
        },
        PrintSection {
            heading: "Overall Plan Health".to_string(),
            break_hint: BreakHint::AvoidInside,
            blocks: vec![PrintBlock::HealthBadge(doc.plan_health())],
        },
        PrintSection {
            heading: "Mission Goals".to_string(),
            break_hint: BreakHint::AvoidInside,
            blocks: doc
                .mission_goals()
                .iter()
                .map(|goal| {
                    PrintBlock::Card(PrintCard {
                        title: goal.title.clone(),
                        subtitle: None,
                        lines: std::iter::once(goal.description.clone())
                            .chain(
                                goal.custom_fields
                                    .iter()
                                    .map(|f| format!("{}: {}", f.label, f.value)),
                            )
                            .filter(|line| !line.is_empty())
                            .collect(),
                        kpis: Vec::new(),
                    })
                })
                .collect(),
        },
        PrintSection {
            heading: "Current Objectives".to_string(),
            break_hint: BreakHint::None,
            blocks: doc
                .objectives()
                .iter()
                .map(|o| PrintBlock::Card(objective_card(o)))
                .collect(),
        },
    ];

    if !doc.past_objectives().is_empty() {
        sections.push(PrintSection {
            heading: "Completed Objectives".to_string(),
            break_hint: BreakHint::PageBefore,
            blocks: doc
                .past_objectives()
                .iter()
                .map(|o| PrintBlock::Card(objective_card(o)))
                .collect(),
        });
    }

    sections.push(PrintSection {
        heading: "Value Realized".to_string(),
        break_hint: BreakHint::AvoidInside,
        blocks: doc
            .value_realized()
            .iter()
            .map(|item| {
                PrintBlock::Card(PrintCard {
                    title: item.value_type.label().to_string(),
                    subtitle: Some(format_date(item.date)),
                    lines: std::iter::once(item.description.clone())
                        .chain(item.link.clone())
                        .filter(|line| !line.is_empty())
                        .collect(),
                    kpis: Vec::new(),
                })
            })
            .collect(),
    });

    sections.push(PrintSection {
        heading: "Key Stakeholders".to_string(),
        break_hint: BreakHint::AvoidInside,
        blocks: doc
            .stakeholders()
            .iter()
            .map(|s| {
                PrintBlock::Card(PrintCard {
                    title: s.name.clone(),
                    subtitle: Some(s.title.clone()).filter(|t| !t.is_empty()),
                    lines: [s.email.clone(), s.notes.clone().unwrap_or_default()]
                        .into_iter()
                        .filter(|line| !line.is_empty())
                        .collect(),
                    kpis: Vec::new(),
                })
            })
            .collect(),
    });

    PrintDocument {
        title: "Customer Success Plan".to_string(),
        customer_name: doc.customer_name().to_string(),
        last_updated: format_date_time(&doc.last_updated()),
        sections,
    }
}

fn objective_card(objective: &Objective) -> PrintCard {
    let target = objective.target_date.map(|_| {
        format!(
            "Target: {} ({})",
            format_date(objective.target_date),
            relative_time(objective.target_date)
        )
    });
    let subtitle = match target {
        Some(target) => Some(format!("{} | {}", objective.status.label(), target)),
        None => Some(objective.status.label().to_string()),
    };

    let mut lines = Vec::new();
    if !objective.description.is_empty() {
        lines.push(objective.description.clone());
    }
    if !objective.challenges.is_empty() {
        lines.push(format!("Challenges: {}", objective.challenges));
    }
    if !objective.next_steps.is_empty() {
        lines.push(format!("Next Steps: {}", objective.next_steps));
    }

    PrintCard {
        title: objective.name.clone(),
        subtitle,
        lines,
        kpis: objective.kpis.iter().map(kpi_tile).collect(),
    }
}

fn kpi_tile(kpi: &Kpi) -> KpiTile {
    KpiTile {
        label: kpi.type_key.label().to_string(),
        value: kpi.display_value(),
        delta: kpi.delta().map(|percent| DeltaBadge {
            percent,
            improved: kpi.is_improvement().unwrap_or(true),
            period: kpi.period,
        }),
    }
}

/// File stem for a printed plan, dated today.
pub fn print_file_stem(doc: &PlanDocument) -> String {
    super::sheets::export_file_stem(doc, Utc::now().date_naive())
}
