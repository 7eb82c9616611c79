use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the four fixed packaging categories every free-text label is
/// normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalCategory {
    #[serde(rename = "Cat-I")]
    CatI,
    #[serde(rename = "Cat-II")]
    CatII,
    #[serde(rename = "Cat-III")]
    CatIII,
    #[serde(rename = "Cat-IV")]
    CatIV,
}

impl CanonicalCategory {
    /// All categories in display order.
    pub const ALL: [CanonicalCategory; 4] = [
        CanonicalCategory::CatI,
        CanonicalCategory::CatII,
        CanonicalCategory::CatIII,
        CanonicalCategory::CatIV,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalCategory::CatI => "Cat-I",
            CanonicalCategory::CatII => "Cat-II",
            CanonicalCategory::CatIII => "Cat-III",
            CanonicalCategory::CatIV => "Cat-IV",
        }
    }

    /// Exact (case-sensitive) match against the canonical labels.
    pub fn from_label(s: &str) -> Option<CanonicalCategory> {
        CanonicalCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Unregistered,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Registered => write!(f, "Registered"),
            RegistrationStatus::Unregistered => write!(f, "Unregistered"),
        }
    }
}

/// A sales or purchase line item as delivered by the upload collaborator.
///
/// Every field is kept as raw text; numeric fields are coerced with
/// [`crate::parsing::values::parse_quantity`] at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub recycled_plastic_percent: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub upload_status: Option<String>,
}

impl RawRecord {
    pub fn new(category: &str, registration_type: &str, financial_year: &str, quantity: &str) -> Self {
        RawRecord {
            category: Some(category.to_string()),
            registration_type: Some(registration_type.to_string()),
            financial_year: Some(financial_year.to_string()),
            quantity: Some(quantity.to_string()),
            ..RawRecord::default()
        }
    }

    pub fn with_percent(mut self, percent: &str) -> Self {
        self.recycled_plastic_percent = Some(percent.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.upload_status = Some(status.to_string());
        self
    }
}

/// A procurement line item used for cost and spend breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub sku_description: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub polymer_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub virgin_qty: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub virgin_rate: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub virgin_amount: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub recycled_qty: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub recycled_rate: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub recycled_amount: Option<String>,
}

/// Spreadsheet exports hand over cells as strings or numbers depending on the
/// cell type; both are kept as text.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
        Loose::Flag(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_roundtrip_through_from_label() {
        for cat in CanonicalCategory::ALL {
            assert_eq!(CanonicalCategory::from_label(cat.label()), Some(cat));
        }
        assert_eq!(CanonicalCategory::from_label("cat-i"), None);
    }

    #[test]
    fn test_raw_record_accepts_numbers_and_strings() {
        let json = r#"{
            "category": "Cat-I (Containers)",
            "registrationType": "Registered",
            "financialYear": "2023-24",
            "quantity": 12.5,
            "recycledPlasticPercent": "30%"
        }"#;
        let rec: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.quantity.as_deref(), Some("12.5"));
        assert_eq!(rec.recycled_plastic_percent.as_deref(), Some("30%"));
        assert_eq!(rec.upload_status, None);
    }

    #[test]
    fn test_raw_record_null_fields_are_absent() {
        let rec: RawRecord = serde_json::from_str(r#"{"quantity": null}"#).unwrap();
        assert_eq!(rec, RawRecord::default());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&CanonicalCategory::CatIII).unwrap();
        assert_eq!(json, "\"Cat-III\"");
    }
}
