// Property-based tests for the aggregation invariants.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use rust_decimal::Decimal;

use epr_core::aggregate::build_cube;
use epr_core::grouping::{group_line_items, Dimension};
use epr_core::model::{CanonicalCategory, CostRecord, RawRecord, RegistrationStatus};
use epr_core::parsing::normalize::normalize_category;
use epr_core::parsing::values::{parse_quantity, round2};
use epr_core::projection::project_rolling_targets;
use epr_core::ProjectionOptions;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Cat-I".to_string()),
        Just("Cat I (Containers)".to_string()),
        Just("Category II".to_string()),
        Just("CAT III".to_string()),
        Just("cat-iv".to_string()),
        Just("Flexible pouch".to_string()),
        Just("".to_string()),
    ]
}

fn arb_registration() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Registered".to_string()),
        Just("Unregistered".to_string()),
        Just("exempt".to_string()),
        Just("".to_string()),
    ]
}

fn arb_year() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("2022-23".to_string()),
        Just("2023-24".to_string()),
        Just("2024-25".to_string()),
        Just("".to_string()),
    ]
}

/// Non-negative quantity, mostly numeric, sometimes junk.
fn arb_quantity() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[0-9]{1,5}(\.[0-9]{1,3})?",
        1 => r"[a-zA-Z ]{0,8}",
        1 => Just("".to_string()),
    ]
}

/// Signed amount, mostly numeric, sometimes junk.
fn arb_amount() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => r"-?[0-9]{1,6}(\.[0-9]{1,2})?".prop_map(Some),
        1 => r"[a-zA-Z/ ]{0,6}".prop_map(Some),
        1 => Just(None),
    ]
}

fn arb_row() -> impl Strategy<Value = RawRecord> {
    (arb_category(), arb_registration(), arb_year(), arb_quantity())
        .prop_map(|(c, r, y, q)| RawRecord::new(&c, &r, &y, &q))
}

fn arb_cost_row() -> impl Strategy<Value = CostRecord> {
    (
        prop::option::of(prop_oneof![Just("Bottle"), Just("Jar")]),
        prop::option::of(prop_oneof![Just("Body"), Just("Cap")]),
        prop::option::of(prop_oneof![Just("PP"), Just("PET")]),
        prop::option::of(prop_oneof![Just("Acme"), Just("Zenith")]),
        arb_amount(),
        arb_amount(),
    )
        .prop_map(|(product, component, polymer, supplier, virgin, recycled)| CostRecord {
            product_name: product.map(String::from),
            sku_description: Some("1L".into()),
            component_name: component.map(String::from),
            polymer_type: polymer.map(String::from),
            category: polymer.map(|_| "Cat-I".to_string()),
            supplier_name: supplier.map(String::from),
            virgin_amount: virgin,
            recycled_amount: recycled,
            ..CostRecord::default()
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    /// Registered plus unregistered never exceeds the category's row total,
    /// and the two differ by exactly the rows lacking a keyword.
    #[test]
    fn status_split_bounded_by_category_total(rows in prop::collection::vec(arb_row(), 0..40)) {
        let cube = build_cube(&rows);
        for category in CanonicalCategory::ALL {
            let all_rows: Decimal = rows
                .iter()
                .filter(|r| r.category.as_deref().and_then(normalize_category) == Some(category))
                .map(|r| parse_quantity(r.quantity.as_deref().unwrap_or_default()))
                .sum();
            let s = cube.summary(category).unwrap();
            // Each summand is rounded to 2 places; allow for that.
            let tolerance = Decimal::new(2, 2);
            prop_assert!(s.registered.total + s.unregistered.total <= round2(all_rows) + tolerance);
            prop_assert!(
                (s.registered.total + s.unregistered.total + s.unclassified_total - round2(all_rows)).abs()
                    <= tolerance
            );
        }
    }

    /// The Total row's cells are the sums of the category rows' cells.
    #[test]
    fn total_row_is_cellwise_sum(rows in prop::collection::vec(arb_row(), 0..40)) {
        let cube = build_cube(&rows);
        let total = cube.total_row().unwrap();
        for year in &cube.years {
            for status in [RegistrationStatus::Registered, RegistrationStatus::Unregistered] {
                let sum: Decimal = CanonicalCategory::ALL
                    .iter()
                    .map(|c| cube.cell(*c, year, status))
                    .sum();
                prop_assert_eq!(total.breakdown(status).year(year), sum);
            }
        }
    }

    /// Group spend always adds up to row-level spend, for every dimension.
    #[test]
    fn grouping_conserves_spend(rows in prop::collection::vec(arb_cost_row(), 0..40)) {
        let expected: Decimal = rows
            .iter()
            .map(|r| {
                parse_quantity(r.virgin_amount.as_deref().unwrap_or_default())
                    + parse_quantity(r.recycled_amount.as_deref().unwrap_or_default())
            })
            .sum();
        for dimension in Dimension::ALL {
            let groups = group_line_items(&rows, dimension);
            let spend: Decimal = groups.iter().map(|g| g.totals.total_spend).sum();
            prop_assert_eq!(spend, expected);
            let row_count: usize = groups.iter().map(|g| g.rows.len()).sum();
            prop_assert_eq!(row_count, rows.len());
        }
    }

    /// With no registered rows the target is always the plain average.
    #[test]
    fn target_is_average_without_deductions(
        q1 in 0u32..100_000,
        q2 in 0u32..100_000,
    ) {
        let rows = vec![
            RawRecord::new("Cat-II", "Unregistered", "2022-23", &q1.to_string()),
            RawRecord::new("Cat-II", "Unregistered", "2023-24", &q2.to_string()),
        ];
        let targets = project_rolling_targets(&rows, &ProjectionOptions::default());
        let t = targets.iter().find(|t| t.category == CanonicalCategory::CatII).unwrap();
        let avg = (Decimal::from(q1) + Decimal::from(q2)) / Decimal::TWO;
        prop_assert_eq!(t.average, avg);
        prop_assert_eq!(t.target, avg);
    }
}
