//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a mission goal.
    GoalId
);

entity_id!(
    /// Unique identifier for a custom field on a mission goal.
    FieldId
);

entity_id!(
    /// Unique identifier for an objective.
    ObjectiveId
);

entity_id!(
    /// Unique identifier for a KPI owned by an objective.
    KpiId
);

entity_id!(
    /// Unique identifier for a stakeholder or directory contact.
    StakeholderId
);

entity_id!(
    /// Unique identifier for a value realized item.
    ValueItemId
);

entity_id!(
    /// Handle for a store subscription.
    SubscriptionId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_ids_are_unique() {
        let ids: HashSet<ObjectiveId> = (0..100).map(|_| ObjectiveId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn id_roundtrips_through_display_and_parse() {
        let id = StakeholderId::new();
        let parsed: StakeholderId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let id = KpiId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<GoalId>().is_err());
    }
}
