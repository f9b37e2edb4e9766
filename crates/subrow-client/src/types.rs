//! Wire types shared across API resources.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ISO 4217 currency code.
///
/// Codes are passed through verbatim rather than validated against a closed
/// set, so values added upstream keep decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Currency {
    /// Wrap a currency code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Pagination metadata attached to list responses as the `meta` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationMeta {
    /// Page returned by this call.
    #[serde(default)]
    pub current_page: i64,
    /// Next page number, absent on the last page.
    #[serde(default)]
    pub next_page: Option<i64>,
    /// Previous page number, absent on the first page.
    #[serde(default)]
    pub prev_page: Option<i64>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: i64,
    /// Total number of records.
    #[serde(default)]
    pub total_count: i64,
}

/// A tax applied to fees or invoices.
#[derive(Debug, Clone, Deserialize)]
pub struct Tax {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Tax name.
    #[serde(default)]
    pub name: String,
    /// Tax code.
    #[serde(default)]
    pub code: String,
    /// Rate, as a percentage.
    #[serde(default)]
    pub rate: f32,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the tax applies organization-wide.
    #[serde(default)]
    pub applied_to_organization: bool,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A billed fee, as embedded in invoices and credit-note items.
#[derive(Debug, Clone, Deserialize)]
pub struct Fee {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Charge the fee originates from.
    #[serde(default)]
    pub subrow_charge_id: Option<Uuid>,
    /// Invoice the fee belongs to.
    #[serde(default)]
    pub subrow_invoice_id: Option<Uuid>,
    /// Amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Amount currency.
    #[serde(default)]
    pub amount_currency: Currency,
    /// Taxes in cents.
    #[serde(default)]
    pub taxes_amount_cents: i64,
    /// Applied tax rate, as a percentage.
    #[serde(default)]
    pub taxes_rate: f32,
    /// Billed units, in the upstream decimal-string encoding.
    #[serde(default)]
    pub units: String,
    /// Number of aggregated usage events.
    #[serde(default)]
    pub events_count: Option<i64>,
    /// Display name used on the invoice.
    #[serde(default)]
    pub invoice_display_name: String,
}

/// A customer, as embedded in invoice responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Customer ID in the caller's system.
    #[serde(default)]
    pub external_id: String,
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Billing currency.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A subscription, as embedded in invoice responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Subscription ID in the caller's system.
    #[serde(default)]
    pub external_id: String,
    /// Customer ID in the caller's system.
    #[serde(default)]
    pub external_customer_id: String,
    /// Plan code.
    #[serde(default)]
    pub plan_code: String,
    /// Subscription status.
    #[serde(default)]
    pub status: String,
    /// Billing time (calendar or anniversary).
    #[serde(default)]
    pub billing_time: Option<String>,
    /// Start timestamp.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Scheduled end timestamp.
    #[serde(default)]
    pub ending_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Customer payload for invoice previews.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerInput {
    /// Customer ID in the caller's system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Customer email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Billing currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Tax identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_identification_number: Option<String>,
}

/// Subscriptions payload for invoice previews.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionsInput {
    /// Subscription IDs in the caller's system.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
    /// Plan code to preview against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
    /// Termination date to preview, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminated_at: Option<String>,
}

/// Coupon payload for invoice previews.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CouponInput {
    /// Coupon code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Fixed amount in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    /// Percentage rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_rate: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_passes_unknown_codes_through() {
        let currency: Currency = serde_json::from_str("\"XTS\"").unwrap();
        assert_eq!(currency.as_str(), "XTS");
        assert_eq!(serde_json::to_string(&currency).unwrap(), "\"XTS\"");
    }

    #[test]
    fn pagination_meta_defaults_missing_fields() {
        let meta: PaginationMeta = serde_json::from_str(r#"{"current_page": 2}"#).unwrap();
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.total_count, 0);
    }

    #[test]
    fn subscriptions_input_omits_empty_fields() {
        let input = SubscriptionsInput::default();
        assert_eq!(serde_json::to_string(&input).unwrap(), "{}");
    }
}
