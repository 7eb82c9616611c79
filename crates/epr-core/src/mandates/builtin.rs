use crate::error::EprError;
use crate::mandates::schema::MandateTable;

const UREP_JSON: &str = include_str!("../../../../mandates/urep.json");

/// Available predefined mandate tables.
pub const PRESETS: &[&str] = &["urep"];

/// The preset used when no table is named.
pub const DEFAULT_PRESET: &str = "urep";

/// Load a predefined mandate table by name.
pub fn load_preset(name: &str) -> Result<MandateTable, EprError> {
    match name {
        "urep" => UREP_JSON.parse(),
        _ => Err(EprError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS.join(", "),
        }),
    }
}
