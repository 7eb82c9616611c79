pub mod mandate;
pub mod options;
pub mod outcome;
pub mod rolling;

pub use mandate::project_mandate_targets;
pub use options::{ProjectionOptions, StatusFilter};
pub use outcome::{MandateTarget, RollingTarget};
pub use rolling::project_rolling_targets;

use crate::model::CanonicalCategory;
use crate::parsing::{years, AnnotatedRow};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Unrounded per-category, per-year quantities recomputed from the rows.
///
/// Counts category rows carrying a registration keyword, the same rows that
/// make up a cube category's grand total.
pub(crate) struct YearlyTotals {
    totals: BTreeMap<(CanonicalCategory, String), Decimal>,
    /// Chronological years, without the "Unknown" bucket.
    pub years: Vec<String>,
}

impl YearlyTotals {
    pub fn from_rows(rows: &[AnnotatedRow<'_>]) -> Self {
        let mut totals = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for row in rows {
            if years::is_unknown(&row.year) {
                continue;
            }
            seen.insert(row.year.clone());

            let Some(category) = row.category else {
                continue;
            };
            if row.facets.status().is_none() {
                continue;
            }
            *totals
                .entry((category, row.year.clone()))
                .or_insert(Decimal::ZERO) += row.quantity;
        }

        YearlyTotals {
            totals,
            years: seen.into_iter().collect(),
        }
    }

    pub fn quantity(&self, category: CanonicalCategory, year: &str) -> Decimal {
        self.totals
            .get(&(category, year.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn latest_year(&self) -> Option<&str> {
        self.years.last().map(String::as_str)
    }
}
