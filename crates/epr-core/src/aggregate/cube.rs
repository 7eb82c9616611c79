use crate::aggregate::outcome::{AggregationCube, CategorySummary, StatusBreakdown, TOTAL_LABEL};
use crate::aggregate::rollup::year_rollup;
use crate::model::{CanonicalCategory, RawRecord, RegistrationStatus};
use crate::parsing::values::round2;
use crate::parsing::{annotate, AnnotatedRow};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Build the category summary cube from raw rows.
///
/// Rebuilt from scratch on every call. Rows whose category does not
/// normalize are left out of the category rows but still count in the
/// financial-year rollup.
pub fn build_cube(rows: &[RawRecord]) -> AggregationCube {
    build_cube_from(&annotate(rows))
}

/// Build the cube from rows that were already annotated.
pub fn build_cube_from(rows: &[AnnotatedRow<'_>]) -> AggregationCube {
    let years = distinct_years(rows);

    let mut accumulators: BTreeMap<CanonicalCategory, CategoryAccumulator> = CanonicalCategory::ALL
        .into_iter()
        .map(|c| (c, CategoryAccumulator::new(&years)))
        .collect();
    let mut unmatched_rows = 0;

    for (idx, row) in rows.iter().enumerate() {
        let Some(category) = row.category else {
            unmatched_rows += 1;
            debug!(
                row = idx,
                label = row.raw.category.as_deref().unwrap_or_default(),
                "category did not normalize, left out of category rows"
            );
            continue;
        };
        let acc = accumulators
            .entry(category)
            .or_insert_with(|| CategoryAccumulator::new(&years));

        match row.facets.status() {
            Some(RegistrationStatus::Unregistered) => acc.unregistered.add(&row.year, row.quantity),
            Some(RegistrationStatus::Registered) => acc.registered.add(&row.year, row.quantity),
            None => {
                debug!(row = idx, %category, "no registration keyword, left out of status split");
                acc.unclassified += row.quantity;
            }
        }
    }

    let mut summaries: Vec<CategorySummary> = accumulators
        .into_iter()
        .map(|(category, acc)| acc.finish(category))
        .collect();
    summaries.push(total_row(&summaries, &years));

    info!(
        rows = rows.len(),
        years = years.len(),
        unmatched_rows,
        "built aggregation cube"
    );

    AggregationCube {
        year_rollup: year_rollup(rows, &years),
        years,
        summaries,
        unmatched_rows,
    }
}

/// Distinct financial-year labels, sorted lexicographically.
///
/// Lexicographic order is chronological for "YYYY-YY" labels; "Unknown"
/// sorts after every numeric label.
pub fn distinct_years(rows: &[AnnotatedRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|r| r.year.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

struct StatusAccumulator {
    by_year: BTreeMap<String, Decimal>,
    total: Decimal,
}

impl StatusAccumulator {
    fn new(years: &[String]) -> Self {
        StatusAccumulator {
            by_year: years.iter().map(|y| (y.clone(), Decimal::ZERO)).collect(),
            total: Decimal::ZERO,
        }
    }

    fn add(&mut self, year: &str, quantity: Decimal) {
        *self.by_year.entry(year.to_string()).or_insert(Decimal::ZERO) += quantity;
        self.total += quantity;
    }

    fn finish(self) -> StatusBreakdown {
        StatusBreakdown {
            by_year: self
                .by_year
                .into_iter()
                .map(|(year, q)| (year, round2(q)))
                .collect(),
            total: round2(self.total),
        }
    }
}

struct CategoryAccumulator {
    registered: StatusAccumulator,
    unregistered: StatusAccumulator,
    unclassified: Decimal,
}

impl CategoryAccumulator {
    fn new(years: &[String]) -> Self {
        CategoryAccumulator {
            registered: StatusAccumulator::new(years),
            unregistered: StatusAccumulator::new(years),
            unclassified: Decimal::ZERO,
        }
    }

    fn finish(self, category: CanonicalCategory) -> CategorySummary {
        let grand_total = round2(self.registered.total + self.unregistered.total);
        CategorySummary {
            label: category.label().to_string(),
            category: Some(category),
            registered: self.registered.finish(),
            unregistered: self.unregistered.finish(),
            grand_total,
            unclassified_total: round2(self.unclassified),
        }
    }
}

/// Sum of the already rounded category rows, cell by cell. Rounding error
/// across categories is carried into the total as is.
fn total_row(summaries: &[CategorySummary], years: &[String]) -> CategorySummary {
    let sum_breakdown = |status: RegistrationStatus| StatusBreakdown {
        by_year: years
            .iter()
            .map(|y| {
                let cell: Decimal = summaries.iter().map(|s| s.breakdown(status).year(y)).sum();
                (y.clone(), cell)
            })
            .collect(),
        total: summaries.iter().map(|s| s.breakdown(status).total).sum(),
    };

    CategorySummary {
        label: TOTAL_LABEL.to_string(),
        category: None,
        registered: sum_breakdown(RegistrationStatus::Registered),
        unregistered: sum_breakdown(RegistrationStatus::Unregistered),
        grand_total: summaries.iter().map(|s| s.grand_total).sum(),
        unclassified_total: summaries.iter().map(|s| s.unclassified_total).sum(),
    }
}
