/// Label used for rows that carry no financial year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// The row's financial-year label, or [`UNKNOWN_YEAR`] when missing or blank.
pub fn label_or_unknown(year: Option<&str>) -> String {
    match year.map(str::trim) {
        Some(y) if !y.is_empty() => y.to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

pub fn is_unknown(year: &str) -> bool {
    year == UNKNOWN_YEAR
}

/// The financial year following `year`.
///
/// "2024-25" -> "2025-26", "2099-00" -> "2100-01", "2024-2025" -> "2025-2026".
/// Returns None for labels not in one of those forms.
pub fn next_label(year: &str) -> Option<String> {
    let (start, end) = year.trim().split_once('-')?;
    if start.len() != 4 || !start.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !end.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let next_start: u32 = start.parse::<u32>().ok()? + 1;
    match end.len() {
        2 => Some(format!("{}-{:02}", next_start, (next_start + 1) % 100)),
        4 => Some(format!("{}-{}", next_start, next_start + 1)),
        _ => None,
    }
}
