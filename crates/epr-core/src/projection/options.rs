use crate::model::CanonicalCategory;
use crate::parsing::AnnotatedRow;
use serde::{Deserialize, Serialize};

/// Which upload statuses may feed the registered-sales and recycled-percent
/// deductions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Only rows with an empty or "completed" upload status.
    #[default]
    Eligible,
    /// Every row regardless of upload status.
    Any,
}

/// Options for the target projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Categories that get no projection rows.
    pub exclude_categories: Vec<CanonicalCategory>,
    pub include_only_status: StatusFilter,
}

impl ProjectionOptions {
    pub fn includes(&self, category: CanonicalCategory) -> bool {
        !self.exclude_categories.contains(&category)
    }

    pub(crate) fn admits(&self, row: &AnnotatedRow<'_>) -> bool {
        match self.include_only_status {
            StatusFilter::Eligible => row.facets.status_eligible,
            StatusFilter::Any => true,
        }
    }
}
