use epr_core::error::EprError;
use epr_core::report::load_report;
use std::path::Path;

use crate::output;

pub fn run(report_file: &Path) -> Result<(), EprError> {
    // A report that was never saved reads the same as an empty one.
    let content = if report_file.exists() {
        std::fs::read_to_string(report_file)?
    } else {
        String::new()
    };

    let report = load_report(&content)?;
    if report.is_empty() {
        println!("No rows processed yet.");
        return Ok(());
    }

    output::table::print_report(&report, "saved");
    Ok(())
}
