//! Invoice custom-section wire types.

use serde::Deserialize;
use uuid::Uuid;

/// A reusable block of free text rendered on invoices.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCustomSection {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Section code.
    #[serde(default)]
    pub code: String,
    /// Section name.
    #[serde(default)]
    pub name: String,
    /// Section description.
    #[serde(default)]
    pub description: String,
    /// Section body.
    #[serde(default)]
    pub details: String,
    /// Section heading.
    #[serde(default)]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_decodes_with_missing_optional_fields() {
        let section: InvoiceCustomSection = serde_json::from_value(serde_json::json!({
            "subrow_id": "9a8b7c6d-5e4f-4a3b-8c1d-0e9f8a7b6c5d",
            "code": "eu_vat_notice",
            "details": "Reverse charge, VAT due by the recipient."
        }))
        .unwrap();
        assert_eq!(section.code, "eu_vat_notice");
        assert!(section.display_name.is_empty());
    }
}
