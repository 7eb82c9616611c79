use epr_core::error::EprError;
use epr_core::mandates::builtin;
use epr_core::mandates::schema::MandateTable;
use epr_core::model::CanonicalCategory;
use std::path::Path;

pub fn list() -> Result<(), EprError> {
    println!("Available mandate tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<8} {} (v{}){}", name, table.name, table.version, default_marker);
        if let Some(ref desc) = table.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), EprError> {
    let table = builtin::load_preset(preset)?;
    print_table(&table);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), EprError> {
    let table = epr_core::mandates::load_table(file)?;
    let entries: usize = table.targets.values().map(|by_year| by_year.len()).sum();
    println!(
        "Valid mandate table: {} (v{}), {} categor{}, {} entr{}",
        table.name,
        table.version,
        table.targets.len(),
        if table.targets.len() == 1 { "y" } else { "ies" },
        entries,
        if entries == 1 { "y" } else { "ies" },
    );
    Ok(())
}

fn print_table(table: &MandateTable) {
    println!("{} (version {})\n", table.name, table.version);
    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    let years = table.years();
    if years.is_empty() {
        println!("No targets defined; every category gets 0 %.");
        return;
    }

    print!("  {:<10}", "Category");
    for year in &years {
        print!("  {:>9}", year);
    }
    println!();
    println!("  {}", "-".repeat(10 + years.len() * 11));

    for category in CanonicalCategory::ALL {
        print!("  {:<10}", category.label());
        for year in &years {
            print!("  {:>9}", format!("{}%", table.percent(category, year)));
        }
        println!();
    }
    println!();
    println!("Years and categories not listed default to 0 %.");
}
