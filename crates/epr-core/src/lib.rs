pub mod aggregate;
pub mod error;
pub mod grouping;
pub mod mandates;
pub mod model;
pub mod parsing;
pub mod projection;
pub mod report;

use mandates::schema::MandateTable;
use model::RawRecord;
pub use projection::{ProjectionOptions, StatusFilter};
use report::ComplianceReport;
use tracing::info;

/// Main API entry point: run every stage over one snapshot of uploaded rows.
///
/// Rows are annotated once and shared by the cube and both projections.
/// Nothing is cached; call again whenever the row set changes.
pub fn summarize(
    rows: &[RawRecord],
    mandates: &MandateTable,
    options: &ProjectionOptions,
) -> ComplianceReport {
    let annotated = parsing::annotate(rows);

    let cube = aggregate::cube::build_cube_from(&annotated);
    let rolling_targets = projection::rolling::project_rolling_targets_from(&annotated, options);
    let mandate_targets =
        projection::mandate::project_mandate_targets_from(&annotated, mandates, options);

    info!(
        rows = rows.len(),
        years = cube.years.len(),
        rolling = rolling_targets.len(),
        mandate = mandate_targets.len(),
        "summarized compliance rows"
    );

    ComplianceReport {
        cube,
        rolling_targets,
        mandate_targets,
    }
}
