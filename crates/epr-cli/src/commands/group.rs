use epr_core::error::EprError;
use epr_core::grouping::{group_line_items, Dimension};
use epr_core::model::CostRecord;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    dimension: &str,
    output_format: &str,
    drill_down: bool,
) -> Result<(), EprError> {
    let dimension: Dimension = dimension.parse()?;

    let bytes = std::fs::read(&input_file)?;
    let rows: Vec<CostRecord> = serde_json::from_slice(&bytes)?;
    let groups = group_line_items(&rows, dimension);

    match output_format {
        "json" => output::json::print(&groups)?,
        _ => output::table::print_groups(&groups, dimension, drill_down),
    }

    Ok(())
}
