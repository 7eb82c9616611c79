use epr_core::error::EprError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), EprError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
