use crate::aggregate::AggregationCube;
use crate::error::EprError;
use crate::projection::{MandateTarget, RollingTarget};
use serde::{Deserialize, Serialize};

/// Everything computed for one snapshot of uploaded rows, in the shape that
/// gets saved and read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceReport {
    pub cube: AggregationCube,
    pub rolling_targets: Vec<RollingTarget>,
    pub mandate_targets: Vec<MandateTarget>,
}

impl ComplianceReport {
    /// True when no rows have been processed yet.
    pub fn is_empty(&self) -> bool {
        self.cube.is_empty() && self.rolling_targets.is_empty() && self.mandate_targets.is_empty()
    }
}

/// Read back a saved report.
///
/// Blank input, `null` and missing fields are all treated as "nothing
/// processed yet".
pub fn load_report(json: &str) -> Result<ComplianceReport, EprError> {
    if json.trim().is_empty() {
        return Ok(ComplianceReport::default());
    }
    let report: Option<ComplianceReport> =
        serde_json::from_str(json).map_err(|e| EprError::ReportLoad(e.to_string()))?;
    Ok(report.unwrap_or_default())
}
