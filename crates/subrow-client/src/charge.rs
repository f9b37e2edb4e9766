//! Charge wire types, embedded in plan and invoice responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Tax;

/// Pricing model of a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeModel {
    /// Flat price per unit.
    Standard,
    /// Graduated ranges.
    Graduated,
    /// Graduated percentage ranges.
    GraduatedPercentage,
    /// Price per package of units.
    Package,
    /// Percentage of the event amount.
    Percentage,
    /// Volume pricing.
    Volume,
    /// Price computed per event.
    Dynamic,
    /// Model not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A filter narrowing a charge to a subset of events.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeFilter {
    /// Display name used on the invoice.
    #[serde(default)]
    pub invoice_display_name: String,
    /// Pricing properties for the filtered subset.
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    /// Event property values the filter matches.
    #[serde(default)]
    pub values: Option<serde_json::Value>,
}

/// A charge attached to a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Billable metric the charge prices.
    #[serde(default)]
    pub subrow_billable_metric_id: Option<Uuid>,
    /// Code of the billable metric.
    #[serde(default)]
    pub billable_metric_code: String,
    /// Pricing model.
    pub charge_model: ChargeModel,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the charge bills in advance.
    #[serde(default)]
    pub pay_in_advance: bool,
    /// Whether the charge produces invoice fees.
    #[serde(default)]
    pub invoiceable: bool,
    /// How paid in-advance fees are regrouped on invoices.
    #[serde(default)]
    pub regroup_paid_fees: String,
    /// Display name used on the invoice.
    #[serde(default)]
    pub invoice_display_name: String,
    /// Whether amounts are prorated.
    #[serde(default)]
    pub prorated: bool,
    /// Minimum billed amount in cents.
    #[serde(default)]
    pub min_amount_cents: i64,
    /// Pricing properties.
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    /// Filters applied to the charge.
    #[serde(default)]
    pub filters: Vec<ChargeFilter>,

    /// Taxes applied to the charge.
    #[serde(rename = "tax", default)]
    pub taxes: Vec<Tax>,
}
