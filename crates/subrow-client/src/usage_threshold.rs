//! Usage-threshold wire types for progressive billing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for creating or updating a usage threshold on a plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageThresholdInput {
    /// Identifier of an existing threshold, absent when creating one.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub subrow_id: Option<Uuid>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_display_name: Option<String>,
    /// Usage amount that triggers the threshold, in cents.
    pub amount_cents: i64,
    /// Whether the threshold repeats after being crossed.
    pub recurring: bool,
}

/// A usage threshold configured on a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageThreshold {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Display name.
    #[serde(default)]
    pub threshold_display_name: String,
    /// Usage amount that triggers the threshold, in cents.
    pub amount_cents: i64,
    /// Whether the threshold repeats after being crossed.
    pub recurring: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A threshold crossing that produced a progressive-billing invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct AppliedUsageThreshold {
    /// Lifetime usage at the time of crossing, in cents.
    pub lifetime_usage_amount_cents: i64,
    /// When the threshold was crossed.
    pub created_at: DateTime<Utc>,
    /// The crossed threshold.
    pub usage_threshold: UsageThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_always_serializes_amount_and_recurrence() {
        let input = UsageThresholdInput {
            subrow_id: None,
            threshold_display_name: None,
            amount_cents: 0,
            recurring: false,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "amount_cents": 0, "recurring": false }));
    }

    #[test]
    fn applied_threshold_decodes_nested_threshold() {
        let applied: AppliedUsageThreshold = serde_json::from_value(serde_json::json!({
            "lifetime_usage_amount_cents": 50_000,
            "created_at": "2024-06-30T12:00:00Z",
            "usage_threshold": {
                "subrow_id": "1d2c3b4a-5f6e-4d7c-8b9a-0f1e2d3c4b5a",
                "threshold_display_name": "50 USD",
                "amount_cents": 5_000,
                "recurring": true,
                "created_at": "2024-06-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z"
            }
        }))
        .unwrap();
        assert_eq!(applied.lifetime_usage_amount_cents, 50_000);
        assert!(applied.usage_threshold.recurring);
    }
}
