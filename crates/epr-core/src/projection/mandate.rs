use crate::mandates::schema::MandateTable;
use crate::model::{CanonicalCategory, RawRecord};
use crate::parsing::values::{percent_of, round4};
use crate::parsing::{annotate, AnnotatedRow};
use crate::projection::options::ProjectionOptions;
use crate::projection::outcome::MandateTarget;
use crate::projection::YearlyTotals;
use tracing::{debug, warn};

/// Apply the mandate table to the most recent financial year in the rows.
pub fn project_mandate_targets(
    rows: &[RawRecord],
    table: &MandateTable,
    options: &ProjectionOptions,
) -> Vec<MandateTarget> {
    project_mandate_targets_from(&annotate(rows), table, options)
}

/// `target = quantity(latest year) * percent(category, latest year) / 100`.
///
/// Categories or years missing from the table get 0 % and a 0 target.
pub fn project_mandate_targets_from(
    rows: &[AnnotatedRow<'_>],
    table: &MandateTable,
    options: &ProjectionOptions,
) -> Vec<MandateTarget> {
    let totals = YearlyTotals::from_rows(rows);
    let Some(year) = totals.latest_year() else {
        debug!("no financial years, no mandate targets");
        return Vec::new();
    };

    if !table.years().iter().any(|y| y == year) {
        warn!(year, table = %table.name, "latest year not in mandate table, targets default to 0");
    }

    CanonicalCategory::ALL
        .into_iter()
        .filter(|c| options.includes(*c))
        .map(|category| {
            let quantity = totals.quantity(category, year);
            let mandate_percent = table.percent(category, year);
            MandateTarget {
                category,
                year: year.to_string(),
                quantity: round4(quantity),
                mandate_percent,
                target: round4(percent_of(quantity, mandate_percent)),
            }
        })
        .collect()
}
