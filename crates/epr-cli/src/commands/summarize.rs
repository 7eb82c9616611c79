use epr_core::error::EprError;
use epr_core::mandates::{self, builtin};
use epr_core::model::{CanonicalCategory, RawRecord};
use epr_core::parsing::normalize::normalize_category;
use epr_core::{ProjectionOptions, StatusFilter};
use std::path::PathBuf;
use tracing::info;

use crate::output;

pub fn run(
    input_file: PathBuf,
    mandate_file: Option<PathBuf>,
    preset: &str,
    exclude: &[String],
    any_status: bool,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), EprError> {
    let table = match mandate_file {
        Some(path) => mandates::load_table(&path)?,
        None => builtin::load_preset(preset)?,
    };

    let options = ProjectionOptions {
        exclude_categories: exclude
            .iter()
            .map(|label| parse_category(label))
            .collect::<Result<_, _>>()?,
        include_only_status: if any_status {
            StatusFilter::Any
        } else {
            StatusFilter::Eligible
        },
    };

    let bytes = std::fs::read(&input_file)?;
    let rows: Vec<RawRecord> = serde_json::from_slice(&bytes)?;
    info!(rows = rows.len(), file = %input_file.display(), "loaded rows");

    let report = epr_core::summarize(&rows, &table, &options);

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        eprintln!(
            "Summarized {} row(s) across {} year(s), written to {}",
            rows.len(),
            report.cube.years.len(),
            path.display()
        );
        if report.cube.unmatched_rows > 0 {
            eprintln!(
                "  {} row(s) with an unrecognized category left out of the category table",
                report.cube.unmatched_rows
            );
        }
        return Ok(());
    }

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report, &table.name),
    }

    Ok(())
}

fn parse_category(label: &str) -> Result<CanonicalCategory, EprError> {
    normalize_category(label).ok_or_else(|| EprError::UnknownCategory(label.to_string()))
}
