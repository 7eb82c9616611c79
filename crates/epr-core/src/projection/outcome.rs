use crate::model::CanonicalCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Virgin-material target for one category, projected from two consecutive
/// financial years. Every amount is rounded to 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingTarget {
    pub category: CanonicalCategory,
    pub year1: String,
    pub year2: String,
    /// The next year present in the data, or the year following `year2`.
    pub target_year: String,
    pub year1_quantity: Decimal,
    pub year2_quantity: Decimal,
    pub average: Decimal,
    /// Registered sales in `year2`, deducted from the average.
    pub registered_sales: Decimal,
    /// Sum of the recycled-plastic percentages reported for `year2`.
    pub recycled_percent: Decimal,
    /// `average * recycled_percent / 100`, deducted from the average.
    pub recycled_quantity: Decimal,
    /// May be negative when the deductions already exceed the average.
    pub target: Decimal,
}

/// Recycled-content target from the mandate table for the latest year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandateTarget {
    pub category: CanonicalCategory,
    pub year: String,
    pub quantity: Decimal,
    pub mandate_percent: Decimal,
    pub target: Decimal,
}
