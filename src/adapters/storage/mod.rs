//! Storage adapters for the plan document.

mod file_plan_storage;
mod in_memory_plan_storage;

pub use file_plan_storage::{FilePlanStorage, STORAGE_KEY};
pub use in_memory_plan_storage::InMemoryPlanStorage;
