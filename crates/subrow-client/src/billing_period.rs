//! Billing-period wire types, embedded in invoice responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a billing period produced an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoicingReason {
    /// Subscription started.
    SubscriptionStarting,
    /// Regular periodic billing.
    SubscriptionPeriodic,
    /// Subscription terminated.
    SubscriptionTerminating,
    /// In-advance charge billed.
    InAdvanceCharge,
    /// Periodic in-advance charge billed.
    InAdvanceChargePeriodic,
    /// Progressive-billing threshold crossed.
    ProgressiveBilling,
    /// Reason not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// The subscription and charge windows an invoice covers.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingPeriod {
    /// Subscription being billed.
    pub subrow_subscription_id: Uuid,
    /// Subscription ID in the caller's system.
    pub external_subscription_id: String,
    /// Plan the subscription follows.
    pub subrow_plan_id: Uuid,
    /// Start of the subscription window.
    pub subscription_from_datetime: DateTime<Utc>,
    /// End of the subscription window.
    pub subscription_to_datetime: DateTime<Utc>,
    /// Start of the charges window.
    pub charges_from_datetime: DateTime<Utc>,
    /// End of the charges window.
    pub charges_to_datetime: DateTime<Utc>,
    /// Why the period was invoiced.
    pub invoicing_reason: InvoicingReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_period_decodes_both_windows() {
        let period: BillingPeriod = serde_json::from_value(serde_json::json!({
            "subrow_subscription_id": "2b3c4d5e-6f70-4a81-92a3-b4c5d6e7f809",
            "external_subscription_id": "sub_1",
            "subrow_plan_id": "0a1b2c3d-4e5f-4607-8899-aabbccddeeff",
            "subscription_from_datetime": "2024-06-01T00:00:00Z",
            "subscription_to_datetime": "2024-06-30T23:59:59Z",
            "charges_from_datetime": "2024-05-01T00:00:00Z",
            "charges_to_datetime": "2024-05-31T23:59:59Z",
            "invoicing_reason": "subscription_periodic"
        }))
        .unwrap();
        assert_eq!(period.external_subscription_id, "sub_1");
        assert_eq!(period.invoicing_reason, InvoicingReason::SubscriptionPeriodic);
        assert!(period.charges_from_datetime < period.subscription_from_datetime);
    }
}
