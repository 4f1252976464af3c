//! Value realized items and their type catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValueItemId;

/// Category of demonstrated value, from a closed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "Time Savings")]
    TimeSavings,
    #[serde(rename = "Win Rate Increase")]
    WinRateIncrease,
    #[serde(rename = "Adoption Rate")]
    AdoptionRate,
    #[serde(rename = "Cost Reduction")]
    CostReduction,
    #[serde(rename = "Revenue Growth")]
    RevenueGrowth,
    #[serde(rename = "Productivity Gain")]
    ProductivityGain,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::TimeSavings,
        ValueType::WinRateIncrease,
        ValueType::AdoptionRate,
        ValueType::CostReduction,
        ValueType::RevenueGrowth,
        ValueType::ProductivityGain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValueType::TimeSavings => "Time Savings",
            ValueType::WinRateIncrease => "Win Rate Increase",
            ValueType::AdoptionRate => "Adoption Rate",
            ValueType::CostReduction => "Cost Reduction",
            ValueType::RevenueGrowth => "Revenue Growth",
            ValueType::ProductivityGain => "Productivity Gain",
        }
    }

    /// Looks up a value type by its exact label.
    pub fn from_label(label: &str) -> Option<ValueType> {
        ValueType::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A concrete, dated piece of realized value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRealizedItem {
    pub id: ValueItemId,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub link: Option<String>,
}

impl ValueRealizedItem {
    pub fn new(value_type: ValueType, description: impl Into<String>) -> Self {
        Self {
            id: ValueItemId::new(),
            value_type,
            description: description.into(),
            date: None,
            link: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Partial update for a value realized item.
#[derive(Debug, Clone, Default)]
pub struct ValueItemPatch {
    pub value_type: Option<ValueType>,
    pub description: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub link: Option<Option<String>>,
}

impl ValueItemPatch {
    pub(crate) fn apply(&self, item: &mut ValueRealizedItem) {
        if let Some(value_type) = self.value_type {
            item.value_type = value_type;
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(date) = self.date {
            item.date = date;
        }
        if let Some(link) = &self.link {
            item.link = link.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_label_lookup_is_exact() {
        assert_eq!(
            ValueType::from_label("Time Savings"),
            Some(ValueType::TimeSavings)
        );
        assert_eq!(ValueType::from_label("time savings"), None);
        assert_eq!(ValueType::from_label("Goodwill"), None);
    }

    #[test]
    fn item_serializes_type_under_the_stored_key() {
        let item = ValueRealizedItem::new(ValueType::CostReduction, "Cut costs 35%");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Cost Reduction");
    }

    #[test]
    fn patch_updates_selected_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut item = ValueRealizedItem::new(ValueType::TimeSavings, "6 hours/week")
            .with_date(date)
            .with_link("https://example.com/impact");

        let patch = ValueItemPatch {
            description: Some("8 hours/week".to_string()),
            link: Some(None),
            ..ValueItemPatch::default()
        };
        patch.apply(&mut item);

        assert_eq!(item.description, "8 hours/week");
        assert_eq!(item.date, Some(date));
        assert_eq!(item.link, None);
    }
}
