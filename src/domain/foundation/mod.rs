//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, date helpers, and
//! error types that form the vocabulary of the success plan domain.

pub mod dates;
mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{FieldId, GoalId, KpiId, ObjectiveId, StakeholderId, SubscriptionId, ValueItemId};
pub use timestamp::Timestamp;
