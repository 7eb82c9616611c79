use crate::model::{RawRecord, RegistrationStatus};
use serde::{Deserialize, Serialize};

/// Boolean facets derived from a row's free-text fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFacets {
    pub is_registered: bool,
    pub is_unregistered: bool,
    pub has_percent: bool,
    pub status_eligible: bool,
}

impl RowFacets {
    /// Registration status, or None when the text carries neither keyword.
    pub fn status(&self) -> Option<RegistrationStatus> {
        if self.is_unregistered {
            Some(RegistrationStatus::Unregistered)
        } else if self.is_registered {
            Some(RegistrationStatus::Registered)
        } else {
            None
        }
    }
}

pub fn classify_row(row: &RawRecord) -> RowFacets {
    let registration = row
        .registration_type
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    // "unregistered" contains "registered", so the negative form is checked first.
    let is_unregistered = registration.contains("unregistered");
    let is_registered = registration.contains("registered") && !is_unregistered;

    let has_percent = row
        .recycled_plastic_percent
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty());

    RowFacets {
        is_registered,
        is_unregistered,
        has_percent,
        status_eligible: is_status_eligible(row.upload_status.as_deref()),
    }
}

/// Empty or absent status, or "completed" in any case.
pub fn is_status_eligible(status: Option<&str>) -> bool {
    match status.map(str::trim) {
        None | Some("") => true,
        Some(s) => s.eq_ignore_ascii_case("completed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(registration: &str) -> RawRecord {
        RawRecord {
            registration_type: Some(registration.into()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_registered() {
        let f = classify_row(&row("Registered"));
        assert!(f.is_registered);
        assert!(!f.is_unregistered);
        assert_eq!(f.status(), Some(RegistrationStatus::Registered));
    }

    #[test]
    fn test_unregistered_is_not_registered() {
        let f = classify_row(&row("UNREGISTERED brand owner"));
        assert!(f.is_unregistered);
        assert!(!f.is_registered);
        assert_eq!(f.status(), Some(RegistrationStatus::Unregistered));
    }

    #[test]
    fn test_neither_keyword() {
        let f = classify_row(&row("Exempt"));
        assert!(!f.is_registered);
        assert!(!f.is_unregistered);
        assert_eq!(f.status(), None);
        assert_eq!(classify_row(&RawRecord::default()).status(), None);
    }

    #[test]
    fn test_has_percent() {
        assert!(!classify_row(&RawRecord::default()).has_percent);
        assert!(!classify_row(&row("Registered").with_percent("   ")).has_percent);
        assert!(classify_row(&row("Registered").with_percent("30")).has_percent);
    }

    #[test]
    fn test_status_eligibility() {
        assert!(is_status_eligible(None));
        assert!(is_status_eligible(Some("")));
        assert!(is_status_eligible(Some("  Completed ")));
        assert!(is_status_eligible(Some("COMPLETED")));
        assert!(!is_status_eligible(Some("pending")));
        assert!(!is_status_eligible(Some("failed")));
    }
}
