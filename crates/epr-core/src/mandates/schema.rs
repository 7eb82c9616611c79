use crate::error::EprError;
use crate::mandates::validate_table;
use crate::model::CanonicalCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Mandated recycled-content percentages keyed by category and financial year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MandateTable {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category label ("Cat-I" ..) -> financial year -> percent (0..=100).
    #[serde(default)]
    pub targets: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl MandateTable {
    /// Mandated percent for a category and year; 0 when the table has no entry.
    pub fn percent(&self, category: CanonicalCategory, year: &str) -> Decimal {
        self.targets
            .get(category.label())
            .and_then(|by_year| by_year.get(year))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Every year mentioned anywhere in the table, sorted.
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = self
            .targets
            .values()
            .flat_map(|by_year| by_year.keys().cloned())
            .collect();
        years.sort();
        years.dedup();
        years
    }
}

impl FromStr for MandateTable {
    type Err = EprError;

    /// Deserialize and validate a table held in memory.
    fn from_str(json: &str) -> Result<Self, Self::Err> {
        let table: MandateTable = serde_json::from_str(json)?;
        validate_table(&table)?;
        Ok(table)
    }
}
