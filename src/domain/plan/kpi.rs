//! KPI entity and delta computation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::KpiId;

use super::KpiType;

/// Reporting period a KPI comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiPeriod {
    Month,
    Quarter,
    Year,
}

impl KpiPeriod {
    /// Label used alongside a delta, e.g. "vs last Quarter".
    pub fn comparison_label(&self) -> &'static str {
        match self {
            KpiPeriod::Month => "vs last Month",
            KpiPeriod::Quarter => "vs last Quarter",
            KpiPeriod::Year => "vs last Year",
        }
    }
}

impl Default for KpiPeriod {
    fn default() -> Self {
        KpiPeriod::Quarter
    }
}

impl fmt::Display for KpiPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KpiPeriod::Month => "Month",
            KpiPeriod::Quarter => "Quarter",
            KpiPeriod::Year => "Year",
        };
        write!(f, "{}", s)
    }
}

/// A measured indicator owned by an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: KpiId,
    pub type_key: KpiType,
    pub current_value: f64,
    #[serde(default)]
    pub previous_value: Option<f64>,
    #[serde(default)]
    pub period: KpiPeriod,
    #[serde(default)]
    pub compare_previous: bool,
}

impl Kpi {
    /// Creates a KPI with a fresh id and the defaults used by the editor:
    /// quarterly period, comparison enabled.
    pub fn new(type_key: KpiType, current_value: f64) -> Self {
        Self {
            id: KpiId::new(),
            type_key,
            current_value,
            previous_value: None,
            period: KpiPeriod::Quarter,
            compare_previous: true,
        }
    }

    /// Sets the previous value for period comparison.
    pub fn with_previous(mut self, previous: f64) -> Self {
        self.previous_value = Some(previous);
        self
    }

    /// Sets the reporting period.
    pub fn with_period(mut self, period: KpiPeriod) -> Self {
        self.period = period;
        self
    }

    /// Percentage change against the previous value, when the KPI opts
    /// into comparison and a previous value exists.
    pub fn delta(&self) -> Option<f64> {
        if !self.compare_previous {
            return None;
        }
        self.previous_value?;
        Some(delta_percent(self.current_value, self.previous_value))
    }

    /// Whether the current delta is an improvement, decided by the KPI
    /// type's directionality.
    pub fn is_improvement(&self) -> Option<bool> {
        let delta = self.delta()?;
        Some(if self.type_key.higher_is_better() {
            delta >= 0.0
        } else {
            delta <= 0.0
        })
    }

    /// The value with its unit suffix, e.g. "52%" or "12s".
    pub fn display_value(&self) -> String {
        format!("{}{}", trim_number(self.current_value), self.type_key.unit())
    }
}

/// Partial update for a KPI. Absent fields leave the KPI unchanged.
#[derive(Debug, Clone, Default)]
pub struct KpiPatch {
    pub type_key: Option<KpiType>,
    pub current_value: Option<f64>,
    pub previous_value: Option<Option<f64>>,
    pub period: Option<KpiPeriod>,
    pub compare_previous: Option<bool>,
}

impl KpiPatch {
    pub(crate) fn apply(&self, kpi: &mut Kpi) {
        if let Some(type_key) = self.type_key {
            kpi.type_key = type_key;
        }
        if let Some(current) = self.current_value {
            kpi.current_value = current;
        }
        if let Some(previous) = self.previous_value {
            kpi.previous_value = previous;
        }
        if let Some(period) = self.period {
            kpi.period = period;
        }
        if let Some(compare) = self.compare_previous {
            kpi.compare_previous = compare;
        }
    }
}

/// Percentage delta between a current and previous value.
///
/// An absent or zero previous value yields 0. Otherwise
/// `(current - previous) / |previous| * 100`, rounded to one decimal.
/// Positive means current exceeds previous; whether that is good belongs
/// to the KPI type's directionality, not this function.
pub fn delta_percent(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        None => 0.0,
        Some(p) if p == 0.0 => 0.0,
        Some(p) => ((current - p) / p.abs() * 100.0 * 10.0).round() / 10.0,
    }
}

/// Formats a value without a trailing ".0" for whole numbers.
pub(crate) fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_percent_computes_rounded_change() {
        assert_eq!(delta_percent(120.0, Some(100.0)), 20.0);
        assert_eq!(delta_percent(80.0, Some(100.0)), -20.0);
        assert_eq!(delta_percent(100.0, Some(3.0)), 3233.3);
    }

    #[test]
    fn delta_percent_defaults_to_zero() {
        assert_eq!(delta_percent(42.0, None), 0.0);
        assert_eq!(delta_percent(42.0, Some(0.0)), 0.0);
    }

    #[test]
    fn delta_uses_absolute_previous_for_sign() {
        // A rise from a negative baseline is still a positive delta.
        assert_eq!(delta_percent(-50.0, Some(-100.0)), 50.0);
    }

    #[test]
    fn kpi_delta_requires_comparison_and_previous() {
        let mut kpi = Kpi::new(KpiType::AdoptionRate, 52.0);
        assert_eq!(kpi.delta(), None);

        kpi = kpi.with_previous(15.0);
        assert_eq!(kpi.delta(), Some(246.7));

        kpi.compare_previous = false;
        assert_eq!(kpi.delta(), None);
    }

    #[test]
    fn improvement_follows_directionality() {
        let up = Kpi::new(KpiType::AdoptionRate, 52.0).with_previous(15.0);
        assert_eq!(up.is_improvement(), Some(true));

        // Time per response dropped from 45s to 12s: negative delta, good.
        let down = Kpi::new(KpiType::TimePerResponse, 12.0).with_previous(45.0);
        assert!(down.delta().unwrap() < 0.0);
        assert_eq!(down.is_improvement(), Some(true));

        let worse = Kpi::new(KpiType::TimePerResponse, 45.0).with_previous(12.0);
        assert_eq!(worse.is_improvement(), Some(false));
    }

    #[test]
    fn display_value_appends_unit() {
        assert_eq!(Kpi::new(KpiType::AdoptionRate, 52.0).display_value(), "52%");
        assert_eq!(
            Kpi::new(KpiType::UserSatisfaction, 4.2).display_value(),
            "4.2/5"
        );
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut kpi = Kpi::new(KpiType::AdoptionRate, 52.0).with_previous(15.0);
        let patch = KpiPatch {
            current_value: Some(60.0),
            ..KpiPatch::default()
        };
        patch.apply(&mut kpi);

        assert_eq!(kpi.current_value, 60.0);
        assert_eq!(kpi.previous_value, Some(15.0));
        assert_eq!(kpi.type_key, KpiType::AdoptionRate);
    }

    #[test]
    fn patch_can_clear_previous_value() {
        let mut kpi = Kpi::new(KpiType::AdoptionRate, 52.0).with_previous(15.0);
        let patch = KpiPatch {
            previous_value: Some(None),
            ..KpiPatch::default()
        };
        patch.apply(&mut kpi);
        assert_eq!(kpi.previous_value, None);
    }
}
