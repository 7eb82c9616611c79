pub mod dimension;

pub use dimension::Dimension;

use crate::model::CostRecord;
use crate::parsing::values::{parse_number, quantity_of};
use dimension::component_key;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Recycled/virgin quantities and spend accumulated over a set of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendTotals {
    /// Rows whose virgin rate parsed as a number.
    pub virgin_rate_count: usize,
    pub virgin_rate_sum: Decimal,
    /// Rows whose recycled rate parsed as a number.
    pub recycled_rate_count: usize,
    pub recycled_rate_sum: Decimal,
    pub virgin_qty: Decimal,
    pub virgin_amount: Decimal,
    pub recycled_qty: Decimal,
    pub recycled_amount: Decimal,
    /// `virgin_amount + recycled_amount`.
    pub total_spend: Decimal,
}

impl SpendTotals {
    fn add(&mut self, row: &CostRecord) {
        if let Some(rate) = row.virgin_rate.as_deref().and_then(parse_number) {
            self.virgin_rate_count += 1;
            self.virgin_rate_sum += rate;
        }
        if let Some(rate) = row.recycled_rate.as_deref().and_then(parse_number) {
            self.recycled_rate_count += 1;
            self.recycled_rate_sum += rate;
        }

        let virgin_amount = quantity_of(row.virgin_amount.as_deref());
        let recycled_amount = quantity_of(row.recycled_amount.as_deref());

        self.virgin_qty += quantity_of(row.virgin_qty.as_deref());
        self.recycled_qty += quantity_of(row.recycled_qty.as_deref());
        self.virgin_amount += virgin_amount;
        self.recycled_amount += recycled_amount;
        self.total_spend += virgin_amount + recycled_amount;
    }

    pub fn average_virgin_rate(&self) -> Decimal {
        average(self.virgin_rate_sum, self.virgin_rate_count)
    }

    pub fn average_recycled_rate(&self) -> Decimal {
        average(self.recycled_rate_sum, self.recycled_rate_count)
    }
}

fn average(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

/// Product/component drill-down entry inside a supplier or polymer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// `product::sku::component`.
    pub key: String,
    pub totals: SpendTotals,
    pub rows: Vec<CostRecord>,
}

/// Rows sharing one grouping key, with their totals and the rows themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedLineItem {
    pub dimension: Dimension,
    pub key: String,
    pub totals: SpendTotals,
    pub rows: Vec<CostRecord>,
    /// Present only for dimensions that expand (supplier, polymer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownEntry>>,
}

impl GroupedLineItem {
    /// Key components, e.g. `["Shampoo", "200ml", "Cap"]`.
    pub fn key_parts(&self) -> Vec<&str> {
        self.key.split("::").collect()
    }
}

/// Group cost line items by a dimension, ordered by key.
///
/// Missing or non-numeric amounts count as 0, so the groups' total spend
/// always equals the row-level spend of the input.
pub fn group_line_items(rows: &[CostRecord], dimension: Dimension) -> Vec<GroupedLineItem> {
    let mut groups: BTreeMap<String, (SpendTotals, Vec<CostRecord>)> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(dimension.key_for(row)).or_default();
        entry.0.add(row);
        entry.1.push(row.clone());
    }

    debug!(%dimension, rows = rows.len(), groups = groups.len(), "grouped line items");

    groups
        .into_iter()
        .map(|(key, (totals, rows))| GroupedLineItem {
            dimension,
            breakdown: dimension.has_breakdown().then(|| breakdown(&rows)),
            key,
            totals,
            rows,
        })
        .collect()
}

fn breakdown(rows: &[CostRecord]) -> Vec<BreakdownEntry> {
    let mut entries: BTreeMap<String, (SpendTotals, Vec<CostRecord>)> = BTreeMap::new();
    for row in rows {
        let entry = entries.entry(component_key(row)).or_default();
        entry.0.add(row);
        entry.1.push(row.clone());
    }
    entries
        .into_iter()
        .map(|(key, (totals, rows))| BreakdownEntry { key, totals, rows })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(product: &str, component: &str, supplier: &str, virgin: &str, recycled: &str) -> CostRecord {
        CostRecord {
            product_name: Some(product.into()),
            sku_description: Some("1L".into()),
            component_name: Some(component.into()),
            polymer_type: Some("HDPE".into()),
            supplier_name: Some(supplier.into()),
            virgin_qty: Some("10".into()),
            virgin_rate: Some("2".into()),
            virgin_amount: Some(virgin.into()),
            recycled_qty: Some("5".into()),
            recycled_amount: Some(recycled.into()),
            ..CostRecord::default()
        }
    }

    #[test]
    fn test_group_by_supplier_with_breakdown() {
        let rows = vec![
            item("Bottle", "Body", "Acme", "100", "50"),
            item("Bottle", "Cap", "Acme", "20", "0"),
            item("Jar", "Body", "Zenith", "70", "30"),
        ];
        let groups = group_line_items(&rows, Dimension::Supplier);
        assert_eq!(groups.len(), 2);

        let acme = &groups[0];
        assert_eq!(acme.key, "Acme");
        assert_eq!(acme.rows.len(), 2);
        assert_eq!(acme.totals.total_spend, dec!(170));
        assert_eq!(acme.totals.virgin_qty, dec!(20));
        assert_eq!(acme.totals.recycled_qty, dec!(10));

        let breakdown = acme.breakdown.as_ref().unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].key, "Bottle::1L::Body");
        assert_eq!(breakdown[0].totals.total_spend, dec!(150));
    }

    #[test]
    fn test_product_and_category_have_no_breakdown() {
        let rows = vec![item("Bottle", "Body", "Acme", "1", "1")];
        for dim in [Dimension::Product, Dimension::Category, Dimension::Component] {
            let groups = group_line_items(&rows, dim);
            assert!(groups[0].breakdown.is_none(), "{dim} should not expand");
        }
        assert!(group_line_items(&rows, Dimension::Polymer)[0].breakdown.is_some());
    }

    #[test]
    fn test_component_grouping_keys() {
        let rows = vec![
            item("Bottle", "Body", "Acme", "1", "0"),
            item("Bottle", "Cap", "Acme", "1", "0"),
            item("Bottle", "Body", "Zenith", "1", "0"),
        ];
        let groups = group_line_items(&rows, Dimension::Component);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Bottle::1L::Body", "Bottle::1L::Cap"]);
        assert_eq!(groups[0].key_parts(), vec!["Bottle", "1L", "Body"]);
        assert_eq!(group_line_items(&rows, Dimension::Product).len(), 1);
    }

    #[test]
    fn test_missing_fields_group_as_unknown() {
        let rows = vec![CostRecord::default(), CostRecord::default()];
        let groups = group_line_items(&rows, Dimension::Polymer);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "Unknown");
        assert_eq!(groups[0].totals.total_spend, Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_amounts_count_as_zero() {
        let rows = vec![
            item("Bottle", "Body", "Acme", "n/a", "25"),
            item("Bottle", "Body", "Acme", "", "abc"),
        ];
        let groups = group_line_items(&rows, Dimension::Supplier);
        assert_eq!(groups[0].totals.total_spend, dec!(25));
    }

    #[test]
    fn test_oversized_amounts_read_as_zero() {
        let rows = vec![
            item("Bottle", "Body", "Acme", "7e28", "7e28"),
            item("Bottle", "Body", "Acme", "10", "5"),
        ];
        let groups = group_line_items(&rows, Dimension::Supplier);
        assert_eq!(groups[0].totals.total_spend, dec!(15));
        assert_eq!(groups[0].totals.virgin_amount, dec!(10));
    }

    #[test]
    fn test_rate_counts_and_averages() {
        let mut with_recycled_rate = item("Bottle", "Body", "Acme", "1", "1");
        with_recycled_rate.recycled_rate = Some("3".into());
        let mut bad_rate = item("Bottle", "Body", "Acme", "1", "1");
        bad_rate.virgin_rate = Some("tbd".into());

        let rows = vec![with_recycled_rate, bad_rate, item("Bottle", "Body", "Acme", "1", "1")];
        let totals = &group_line_items(&rows, Dimension::Supplier)[0].totals;
        assert_eq!(totals.virgin_rate_count, 2);
        assert_eq!(totals.recycled_rate_count, 1);
        assert_eq!(totals.average_virgin_rate(), dec!(2));
        assert_eq!(totals.average_recycled_rate(), dec!(3));
    }

    #[test]
    fn test_average_with_no_observations() {
        assert_eq!(SpendTotals::default().average_virgin_rate(), Decimal::ZERO);
    }
}
