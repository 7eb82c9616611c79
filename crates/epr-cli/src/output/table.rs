use epr_core::aggregate::AggregationCube;
use epr_core::grouping::{Dimension, GroupedLineItem, SpendTotals};
use epr_core::projection::{MandateTarget, RollingTarget};
use epr_core::report::ComplianceReport;
use rust_decimal::Decimal;

pub fn print_report(report: &ComplianceReport, mandate_name: &str) {
    print_cube(&report.cube);
    print_rolling(&report.rolling_targets);
    print_mandate(&report.mandate_targets, mandate_name);
}

fn print_cube(cube: &AggregationCube) {
    println!("=== Category summary (MT) ===\n");

    if cube.is_empty() {
        println!("  No rows processed yet.\n");
        return;
    }

    let mut header = vec!["Category".to_string()];
    for year in &cube.years {
        header.push(format!("Reg {year}"));
        header.push(format!("Unreg {year}"));
    }
    header.extend(["Reg total", "Unreg total", "Total"].map(String::from));

    let rows: Vec<Vec<String>> = cube
        .summaries
        .iter()
        .map(|s| {
            let mut cells = vec![s.label.clone()];
            for year in &cube.years {
                cells.push(fixed2(s.registered.year(year)));
                cells.push(fixed2(s.unregistered.year(year)));
            }
            cells.push(fixed2(s.registered.total));
            cells.push(fixed2(s.unregistered.total));
            cells.push(fixed2(s.grand_total));
            cells
        })
        .collect();
    print_grid(&header, &rows);

    let unclassified: Decimal = cube
        .summaries
        .iter()
        .filter(|s| !s.is_total())
        .map(|s| s.unclassified_total)
        .sum();
    if !unclassified.is_zero() {
        println!(
            "  {} MT without a registration keyword left out of the split",
            fixed2(unclassified)
        );
    }
    if cube.unmatched_rows > 0 {
        println!(
            "  {} row(s) with an unrecognized category left out (still in the yearly rollup)",
            cube.unmatched_rows
        );
    }
    println!();

    println!("=== Financial year rollup (MT) ===\n");
    let header = ["Year", "Registered", "Unregistered"].map(String::from);
    let rows: Vec<Vec<String>> = cube
        .year_rollup
        .iter()
        .map(|r| vec![r.year.clone(), fixed2(r.registered), fixed2(r.unregistered)])
        .collect();
    print_grid(&header, &rows);
    println!();
}

fn print_rolling(targets: &[RollingTarget]) {
    println!("=== Virgin material targets (rolling two-year average) ===\n");
    if targets.is_empty() {
        println!("  At least two financial years are needed.\n");
        return;
    }

    let header = [
        "Category",
        "Target year",
        "Year 1",
        "Qty 1",
        "Year 2",
        "Qty 2",
        "Average",
        "Reg. sales",
        "Recycled %",
        "Recycled qty",
        "Target",
    ]
    .map(String::from);
    let rows: Vec<Vec<String>> = targets
        .iter()
        .map(|t| {
            vec![
                t.category.to_string(),
                t.target_year.clone(),
                t.year1.clone(),
                t.year1_quantity.to_string(),
                t.year2.clone(),
                t.year2_quantity.to_string(),
                t.average.to_string(),
                t.registered_sales.to_string(),
                t.recycled_percent.to_string(),
                t.recycled_quantity.to_string(),
                t.target.to_string(),
            ]
        })
        .collect();
    print_grid(&header, &rows);
    println!();
}

fn print_mandate(targets: &[MandateTarget], mandate_name: &str) {
    println!("=== Recycled content targets ({mandate_name}) ===\n");
    let Some(first) = targets.first() else {
        println!("  No financial year found.\n");
        return;
    };
    println!("  Latest year: {}\n", first.year);

    let header = ["Category", "Quantity", "Mandate %", "Target"].map(String::from);
    let rows: Vec<Vec<String>> = targets
        .iter()
        .map(|t| {
            vec![
                t.category.to_string(),
                t.quantity.to_string(),
                t.mandate_percent.to_string(),
                t.target.to_string(),
            ]
        })
        .collect();
    print_grid(&header, &rows);
    println!();
}

pub fn print_groups(groups: &[GroupedLineItem], dimension: Dimension, drill_down: bool) {
    println!("=== Spend by {dimension} ===\n");
    if groups.is_empty() {
        println!("  No line items.\n");
        return;
    }

    let header = [
        "Key",
        "Virgin qty",
        "Virgin amt",
        "Recycled qty",
        "Recycled amt",
        "Total spend",
        "Rows",
    ]
    .map(String::from);

    let mut rows = Vec::new();
    for group in groups {
        rows.push(spend_row(&group.key, &group.totals, group.rows.len()));
        if drill_down {
            for entry in group.breakdown.iter().flatten() {
                rows.push(spend_row(
                    &format!("  {}", entry.key),
                    &entry.totals,
                    entry.rows.len(),
                ));
            }
        }
    }
    print_grid(&header, &rows);

    let total: Decimal = groups.iter().map(|g| g.totals.total_spend).sum();
    println!("\n  Total spend: {}", fixed2(total));
    if drill_down && !dimension.has_breakdown() {
        println!("  (drill-down is available for supplier and polymer only)");
    }
    println!();
}

fn spend_row(key: &str, totals: &SpendTotals, count: usize) -> Vec<String> {
    vec![
        key.to_string(),
        fixed2(totals.virgin_qty),
        fixed2(totals.virgin_amount),
        fixed2(totals.recycled_qty),
        fixed2(totals.recycled_amount),
        fixed2(totals.total_spend),
        count.to_string(),
    ]
}

fn fixed2(v: Decimal) -> String {
    format!("{:.2}", v)
}

/// First column left-aligned, the rest right-aligned.
fn print_grid(header: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let render = |cells: &[String]| {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == 0 {
                    format!("{:<w$}", cell, w = w)
                } else {
                    format!("{:>w$}", cell, w = w)
                }
            })
            .collect();
        format!("  {}", parts.join("  "))
    };

    println!("{}", render(header));
    let rule_width: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    println!("  {}", "-".repeat(rule_width));
    for row in rows {
        println!("{}", render(row.as_slice()));
    }
}
