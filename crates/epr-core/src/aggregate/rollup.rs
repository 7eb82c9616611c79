use crate::aggregate::outcome::YearRollup;
use crate::model::RegistrationStatus;
use crate::parsing::values::round2;
use crate::parsing::AnnotatedRow;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Registered/unregistered totals per financial year.
///
/// Unlike the category rows this takes every row, including those whose
/// category label did not normalize. Rows without a registration keyword
/// are still left out.
pub fn year_rollup(rows: &[AnnotatedRow<'_>], years: &[String]) -> Vec<YearRollup> {
    let mut sums: BTreeMap<&str, (Decimal, Decimal)> = years
        .iter()
        .map(|y| (y.as_str(), (Decimal::ZERO, Decimal::ZERO)))
        .collect();

    for row in rows {
        let entry = sums
            .entry(row.year.as_str())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match row.facets.status() {
            Some(RegistrationStatus::Registered) => entry.0 += row.quantity,
            Some(RegistrationStatus::Unregistered) => entry.1 += row.quantity,
            None => {}
        }
    }

    sums.into_iter()
        .map(|(year, (registered, unregistered))| YearRollup {
            year: year.to_string(),
            registered: round2(registered),
            unregistered: round2(unregistered),
        })
        .collect()
}
