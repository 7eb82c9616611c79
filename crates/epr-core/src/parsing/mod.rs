pub mod facets;
pub mod normalize;
pub mod values;
pub mod years;

use crate::model::{CanonicalCategory, RawRecord};
use facets::{classify_row, RowFacets};
use normalize::normalize_category;
use rust_decimal::Decimal;
use values::quantity_of;

/// A raw row together with everything the aggregation stages derive from it.
#[derive(Debug, Clone)]
pub struct AnnotatedRow<'a> {
    pub raw: &'a RawRecord,
    pub category: Option<CanonicalCategory>,
    pub year: String,
    pub quantity: Decimal,
    pub facets: RowFacets,
}

impl AnnotatedRow<'_> {
    pub fn recycled_percent(&self) -> Decimal {
        quantity_of(self.raw.recycled_plastic_percent.as_deref())
    }
}

/// Normalize and classify every row. Input order is preserved and the rows
/// themselves are not touched.
pub fn annotate(rows: &[RawRecord]) -> Vec<AnnotatedRow<'_>> {
    rows.iter()
        .map(|raw| AnnotatedRow {
            raw,
            category: raw.category.as_deref().and_then(normalize_category),
            year: years::label_or_unknown(raw.financial_year.as_deref()),
            quantity: quantity_of(raw.quantity.as_deref()),
            facets: classify_row(raw),
        })
        .collect()
}
