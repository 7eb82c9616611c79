use crate::model::{CanonicalCategory, RawRecord};
use crate::parsing::values::{percent_of, round4};
use crate::parsing::{annotate, years, AnnotatedRow};
use crate::projection::options::ProjectionOptions;
use crate::projection::outcome::RollingTarget;
use crate::projection::YearlyTotals;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Project virgin-material targets from every pair of consecutive years.
pub fn project_rolling_targets(
    rows: &[RawRecord],
    options: &ProjectionOptions,
) -> Vec<RollingTarget> {
    project_rolling_targets_from(&annotate(rows), options)
}

/// For each category and each consecutive year pair `(year1, year2)`:
///
/// ```text
/// average          = (qty(year1) + qty(year2)) / 2
/// recycled_qty     = average * recycled_percent(year2) / 100
/// target           = average - registered_sales(year2) - recycled_qty
/// ```
///
/// Fewer than two known years gives no rows.
pub fn project_rolling_targets_from(
    rows: &[AnnotatedRow<'_>],
    options: &ProjectionOptions,
) -> Vec<RollingTarget> {
    let totals = YearlyTotals::from_rows(rows);
    if totals.years.len() < 2 {
        debug!(years = totals.years.len(), "not enough financial years for rolling targets");
        return Vec::new();
    }

    let mut targets = Vec::new();
    for category in CanonicalCategory::ALL {
        if !options.includes(category) {
            continue;
        }
        for (i, pair) in totals.years.windows(2).enumerate() {
            let (year1, year2) = (&pair[0], &pair[1]);
            let target_year = match totals.years.get(i + 2) {
                Some(next) => next.clone(),
                None => years::next_label(year2).unwrap_or_else(|| years::UNKNOWN_YEAR.to_string()),
            };
            targets.push(project_pair(rows, &totals, options, category, year1, year2, target_year));
        }
    }

    info!(rows = targets.len(), "projected rolling targets");
    targets
}

fn project_pair(
    rows: &[AnnotatedRow<'_>],
    totals: &YearlyTotals,
    options: &ProjectionOptions,
    category: CanonicalCategory,
    year1: &str,
    year2: &str,
    target_year: String,
) -> RollingTarget {
    let year1_quantity = totals.quantity(category, year1);
    let year2_quantity = totals.quantity(category, year2);
    let average = (year1_quantity + year2_quantity) / Decimal::TWO;

    let registered_in_year2 = || {
        rows.iter().filter(move |r| {
            r.category == Some(category)
                && r.year == year2
                && r.facets.is_registered
                && options.admits(r)
        })
    };

    let registered_sales: Decimal = registered_in_year2().map(|r| r.quantity).sum();
    // Percentages are summed across rows, not averaged.
    let recycled_percent: Decimal = registered_in_year2()
        .filter(|r| r.facets.has_percent)
        .map(|r| r.recycled_percent())
        .sum();

    let recycled_quantity = percent_of(average, recycled_percent);
    let target = average - registered_sales - recycled_quantity;

    RollingTarget {
        category,
        year1: year1.to_string(),
        year2: year2.to_string(),
        target_year,
        year1_quantity: round4(year1_quantity),
        year2_quantity: round4(year2_quantity),
        average: round4(average),
        registered_sales: round4(registered_sales),
        recycled_percent: round4(recycled_percent),
        recycled_quantity: round4(recycled_quantity),
        target: round4(target),
    }
}
