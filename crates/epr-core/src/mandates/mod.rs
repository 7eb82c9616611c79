pub mod builtin;
pub mod schema;

use crate::error::EprError;
use crate::model::CanonicalCategory;
use crate::parsing::years;
use rust_decimal::Decimal;
use schema::MandateTable;
use std::path::Path;

/// Read and validate a mandate table file.
///
/// Syntax errors are reported against `path`; a well-formed table with bad
/// contents surfaces as [`EprError::MandateInvalid`].
pub fn load_table(path: &Path) -> Result<MandateTable, EprError> {
    let load_error = |reason: String| EprError::MandateLoad {
        path: path.to_path_buf(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    match content.parse::<MandateTable>() {
        Err(EprError::Json(e)) => Err(load_error(e.to_string())),
        other => other,
    }
}

/// Check category labels, year labels and percent bounds of a table.
pub fn validate_table(table: &MandateTable) -> Result<(), EprError> {
    if table.name.trim().is_empty() {
        return Err(EprError::MandateInvalid("name must not be empty".into()));
    }

    for (label, by_year) in &table.targets {
        if CanonicalCategory::from_label(label).is_none() {
            return Err(EprError::UnknownCategory(label.clone()));
        }
        if let Some((year, _)) = by_year.iter().find(|(year, _)| years::next_label(year).is_none()) {
            return Err(EprError::MandateInvalid(format!(
                "{label}: '{year}' is not a financial year like 2025-26"
            )));
        }
        if let Some((year, percent)) = by_year
            .iter()
            .find(|(_, p)| **p < Decimal::ZERO || **p > Decimal::ONE_HUNDRED)
        {
            return Err(EprError::MandateInvalid(format!(
                "{label} {year}: {percent}% is not a percentage"
            )));
        }
    }

    Ok(())
}
