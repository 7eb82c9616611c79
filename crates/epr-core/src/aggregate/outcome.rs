use crate::model::{CanonicalCategory, RegistrationStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label of the synthetic row summing all category rows.
pub const TOTAL_LABEL: &str = "Total";

/// Quantities for one registration status, per financial year and overall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    /// Financial year -> quantity (MT), one entry for every year in the cube.
    pub by_year: BTreeMap<String, Decimal>,
    pub total: Decimal,
}

impl StatusBreakdown {
    pub fn year(&self, year: &str) -> Decimal {
        self.by_year.get(year).copied().unwrap_or(Decimal::ZERO)
    }
}

/// One row of the category summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// "Cat-I" .. "Cat-IV", or "Total" for the synthetic row.
    pub label: String,
    /// None for the synthetic Total row.
    pub category: Option<CanonicalCategory>,
    pub registered: StatusBreakdown,
    pub unregistered: StatusBreakdown,
    /// Registered plus unregistered.
    pub grand_total: Decimal,
    /// Quantity of category rows carrying neither registration keyword.
    /// These rows are left out of both breakdowns.
    pub unclassified_total: Decimal,
}

impl CategorySummary {
    pub fn breakdown(&self, status: RegistrationStatus) -> &StatusBreakdown {
        match status {
            RegistrationStatus::Registered => &self.registered,
            RegistrationStatus::Unregistered => &self.unregistered,
        }
    }

    pub fn is_total(&self) -> bool {
        self.category.is_none()
    }
}

/// Registered/unregistered quantities for one financial year, across every
/// row whether or not its category could be normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRollup {
    pub year: String,
    pub registered: Decimal,
    pub unregistered: Decimal,
}

/// Category x financial year x registration status summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationCube {
    /// Distinct year labels, sorted lexicographically.
    pub years: Vec<String>,
    /// One row per canonical category followed by the Total row.
    pub summaries: Vec<CategorySummary>,
    pub year_rollup: Vec<YearRollup>,
    /// Rows left out of the category rows because their label did not normalize.
    pub unmatched_rows: usize,
}

impl AggregationCube {
    pub fn summary(&self, category: CanonicalCategory) -> Option<&CategorySummary> {
        self.summaries
            .iter()
            .find(|s| s.category == Some(category))
    }

    pub fn total_row(&self) -> Option<&CategorySummary> {
        self.summaries.iter().find(|s| s.is_total())
    }

    /// Displayed quantity for a single (category, year, status) cell.
    pub fn cell(
        &self,
        category: CanonicalCategory,
        year: &str,
        status: RegistrationStatus,
    ) -> Decimal {
        self.summary(category)
            .map(|s| s.breakdown(status).year(year))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn rollup(&self, year: &str) -> Option<&YearRollup> {
        self.year_rollup.iter().find(|r| r.year == year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
