use crate::error::EprError;
use crate::model::CostRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder for a missing grouping field.
pub const UNKNOWN_FIELD: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Product,
    Component,
    Polymer,
    Category,
    Supplier,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Product,
        Dimension::Component,
        Dimension::Polymer,
        Dimension::Category,
        Dimension::Supplier,
    ];

    /// Whether groups carry a product/component breakdown for drill-down.
    /// Only supplier and polymer views expand.
    pub fn has_breakdown(&self) -> bool {
        matches!(self, Dimension::Supplier | Dimension::Polymer)
    }

    /// Composite grouping key for a row, e.g. `product::sku` or
    /// `product::sku::component`.
    pub fn key_for(&self, row: &CostRecord) -> String {
        match self {
            Dimension::Product => format!(
                "{}::{}",
                field(&row.product_name),
                field(&row.sku_description)
            ),
            Dimension::Component => component_key(row),
            Dimension::Polymer => field(&row.polymer_type).to_string(),
            Dimension::Category => field(&row.category).to_string(),
            Dimension::Supplier => field(&row.supplier_name).to_string(),
        }
    }
}

/// `product::sku::component`, the key used for drill-down entries.
pub fn component_key(row: &CostRecord) -> String {
    format!(
        "{}::{}::{}",
        field(&row.product_name),
        field(&row.sku_description),
        field(&row.component_name)
    )
}

/// A trimmed text field, or [`UNKNOWN_FIELD`] when missing or blank.
pub fn field(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_FIELD,
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Product => "product",
            Dimension::Component => "component",
            Dimension::Polymer => "polymer",
            Dimension::Category => "category",
            Dimension::Supplier => "supplier",
        };
        f.write_str(name)
    }
}

impl FromStr for Dimension {
    type Err = EprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Dimension::ALL
            .into_iter()
            .find(|d| d.to_string() == lower)
            .ok_or_else(|| EprError::UnknownDimension(s.to_string()))
    }
}
