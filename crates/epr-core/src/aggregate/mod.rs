pub mod cube;
pub mod outcome;
pub mod rollup;

pub use cube::build_cube;
pub use outcome::{AggregationCube, CategorySummary, StatusBreakdown, YearRollup, TOTAL_LABEL};
