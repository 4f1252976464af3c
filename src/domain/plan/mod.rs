//! Plan domain - the success plan aggregate and its value objects.

mod catalog;
mod document;
mod health;
mod kpi;
mod mission_goal;
mod objective;
mod stakeholder;
mod update;
mod value_realized;

pub use catalog::{suggested_kpi_types, KpiType, Product};
pub use document::{PlanDocument, PlanError};
pub use health::PlanHealth;
pub use kpi::{delta_percent, Kpi, KpiPatch, KpiPeriod};
pub(crate) use kpi::trim_number;
pub use mission_goal::{CustomField, GoalPatch, MissionGoal};
pub use objective::{Objective, ObjectivePatch, ObjectiveStatus};
pub use stakeholder::{contact_directory, find_contact, Contact, Stakeholder};
pub use update::PlanUpdate;
pub use value_realized::{ValueItemPatch, ValueRealizedItem, ValueType};
