//! Fixed catalogs: KPI types and products.
//!
//! Both are closed enumerations keyed by a stable identifier; labels are
//! derived display properties. The product to KPI mapping is advisory
//! only, used to suggest indicator types when a KPI is created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurable indicator definitions.
///
/// Serialized by stable key (snake_case) so renaming a label never breaks
/// stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiType {
    ContentUtilization,
    AnswerWithAi,
    TimePerResponse,
    SalesCycleReduction,
    ContentAccuracy,
    UserSatisfaction,
    AdoptionRate,
    ResponseQuality,
    RevenueImpact,
}

impl KpiType {
    /// All KPI types in catalog order.
    pub const ALL: [KpiType; 9] = [
        KpiType::ContentUtilization,
        KpiType::AnswerWithAi,
        KpiType::TimePerResponse,
        KpiType::SalesCycleReduction,
        KpiType::ContentAccuracy,
        KpiType::UserSatisfaction,
        KpiType::AdoptionRate,
        KpiType::ResponseQuality,
        KpiType::RevenueImpact,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            KpiType::ContentUtilization => "Content Utilization",
            KpiType::AnswerWithAi => "Answers with AI",
            KpiType::TimePerResponse => "Time per Response",
            KpiType::SalesCycleReduction => "Sales Cycle Reduction",
            KpiType::ContentAccuracy => "Content Accuracy",
            KpiType::UserSatisfaction => "User Satisfaction",
            KpiType::AdoptionRate => "Adoption Rate",
            KpiType::ResponseQuality => "Response Quality",
            KpiType::RevenueImpact => "Revenue Impact",
        }
    }

    /// Unit suffix shown after the value.
    pub fn unit(&self) -> &'static str {
        match self {
            KpiType::ContentUtilization => "%",
            KpiType::AnswerWithAi => "%",
            KpiType::TimePerResponse => "s",
            KpiType::SalesCycleReduction => "days",
            KpiType::ContentAccuracy => "%",
            KpiType::UserSatisfaction => "/5",
            KpiType::AdoptionRate => "%",
            KpiType::ResponseQuality => "/10",
            KpiType::RevenueImpact => "$k",
        }
    }

    /// Whether a larger value is an improvement.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, KpiType::TimePerResponse | KpiType::SalesCycleReduction)
    }

    /// Looks up a KPI type by its exact label (case-sensitive).
    ///
    /// Import relies on this being strict; unmatched labels drop the
    /// segment rather than guessing.
    pub fn from_label(label: &str) -> Option<KpiType> {
        KpiType::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for KpiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The fixed product catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Responsive AI")]
    ResponsiveAi,
    #[serde(rename = "Content Management")]
    ContentManagement,
    #[serde(rename = "Sales Enablement")]
    SalesEnablement,
    #[serde(rename = "Analytics Suite")]
    AnalyticsSuite,
}

impl Product {
    /// All products in catalog order.
    pub const ALL: [Product; 4] = [
        Product::ResponsiveAi,
        Product::ContentManagement,
        Product::SalesEnablement,
        Product::AnalyticsSuite,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Product::ResponsiveAi => "Responsive AI",
            Product::ContentManagement => "Content Management",
            Product::SalesEnablement => "Sales Enablement",
            Product::AnalyticsSuite => "Analytics Suite",
        }
    }

    /// Looks up a product by its exact label.
    pub fn from_label(label: &str) -> Option<Product> {
        Product::ALL.into_iter().find(|p| p.label() == label)
    }

    /// KPI types suggested for this product. Advisory, not enforced.
    pub fn suggested_kpis(&self) -> &'static [KpiType] {
        match self {
            Product::ResponsiveAi => &[
                KpiType::AnswerWithAi,
                KpiType::TimePerResponse,
                KpiType::ResponseQuality,
                KpiType::UserSatisfaction,
            ],
            Product::ContentManagement => &[
                KpiType::ContentUtilization,
                KpiType::ContentAccuracy,
                KpiType::AdoptionRate,
            ],
            Product::SalesEnablement => &[
                KpiType::SalesCycleReduction,
                KpiType::RevenueImpact,
                KpiType::AnswerWithAi,
            ],
            Product::AnalyticsSuite => &[
                KpiType::ContentUtilization,
                KpiType::UserSatisfaction,
                KpiType::AdoptionRate,
            ],
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Suggested KPI types for a set of products, deduplicated in first-seen
/// order.
pub fn suggested_kpi_types(products: &[Product]) -> Vec<KpiType> {
    let mut seen = Vec::new();
    for product in products {
        for kpi in product.suggested_kpis() {
            if !seen.contains(kpi) {
                seen.push(*kpi);
            }
        }
    }
    seen
}
