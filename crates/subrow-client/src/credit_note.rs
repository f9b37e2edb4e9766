//! Credit-note endpoints and wire types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::{Client, ClientRequest, QueryParams};
use crate::error::Error;
use crate::types::{Currency, Fee, PaginationMeta};

/// Whether a credit note's credit is still spendable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditNoteCreditStatus {
    /// Credit still available.
    Available,
    /// Credit fully consumed.
    Consumed,
    /// Status not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Refund progress of a credit note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditNoteRefundStatus {
    /// Refund pending.
    Pending,
    /// Refund settled.
    Refunded,
    /// Status not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Reason a credit note was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditNoteReason {
    /// Charge was billed twice.
    DuplicatedCharge,
    /// Product did not satisfy the customer.
    ProductUnsatisfactory,
    /// Order was changed.
    OrderChange,
    /// Order was cancelled.
    OrderCancellation,
    /// Charge was fraudulent.
    FraudulentCharge,
    /// Any other reason.
    Other,
    /// Reason not in the known set, passed through verbatim.
    #[serde(untagged)]
    Unknown(String),
}

/// Access to the credit-note endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CreditNoteRequest<'a> {
    client: &'a Client,
}

/// Filters for listing credit notes.
#[derive(Debug, Clone, Default)]
pub struct CreditNoteListInput {
    /// Page size.
    pub per_page: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Restrict to one customer.
    pub external_customer_id: Option<String>,
}

impl QueryParams for CreditNoteListInput {
    fn query_params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        if let Some(per_page) = self.per_page {
            params.insert("per_page", per_page.to_string());
        }
        if let Some(page) = self.page {
            params.insert("page", page.to_string());
        }
        if let Some(id) = self
            .external_customer_id
            .as_deref()
            .filter(|v| !v.is_empty())
        {
            params.insert("external_customer_id", id.to_string());
        }
        params
    }
}

/// A credited fee on a credit note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteItem {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Credited amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Credited amount currency.
    #[serde(default)]
    pub amount_currency: Currency,
    /// Fee the item credits.
    #[serde(default)]
    pub fee: Option<Fee>,
}

/// A tax applied to a credit note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteAppliedTax {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Credit note the tax applies to.
    #[serde(default)]
    pub subrow_credit_note_id: Option<Uuid>,
    /// Tax definition applied.
    #[serde(default)]
    pub subrow_tax_id: Option<Uuid>,
    /// Tax name.
    #[serde(default)]
    pub tax_name: String,
    /// Tax code.
    #[serde(default)]
    pub tax_code: String,
    /// Rate, as a percentage.
    #[serde(default)]
    pub tax_rate: f32,
    /// Tax description.
    #[serde(default)]
    pub tax_description: String,
    /// Taxed amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Taxed amount currency.
    #[serde(default)]
    pub amount_currency: Currency,
    /// Base the tax was computed on, in cents.
    #[serde(default)]
    pub base_amount_cents: i64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A credit note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNote {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Sequential number within the billing entity.
    #[serde(default)]
    pub sequential_id: i64,
    /// Billing entity that issued the credit note.
    #[serde(default)]
    pub billing_entity_code: String,
    /// Document number.
    #[serde(default)]
    pub number: String,
    /// Invoice the credit note offsets.
    #[serde(default)]
    pub subrow_invoice_id: Option<Uuid>,
    /// Number of the offset invoice.
    #[serde(default)]
    pub invoice_number: String,
    /// Reason the credit note was issued.
    #[serde(default)]
    pub reason: Option<CreditNoteReason>,

    /// Credit availability.
    #[serde(default)]
    pub credit_status: Option<CreditNoteCreditStatus>,
    /// Refund progress.
    #[serde(default)]
    pub refund_status: Option<CreditNoteRefundStatus>,

    /// Document currency.
    #[serde(default)]
    pub currency: Currency,
    /// Grand total in cents.
    #[serde(default)]
    pub total_amount_cents: i64,
    /// Credited amount in cents.
    #[serde(default)]
    pub credit_amount_cents: i64,
    /// Remaining spendable amount in cents.
    #[serde(default)]
    pub balance_amount_cents: i64,
    /// Refunded amount in cents.
    #[serde(default)]
    pub refund_amount_cents: i64,
    /// Taxes total in cents.
    #[serde(default)]
    pub taxes_amount_cents: i64,
    /// Applied tax rate, as a percentage.
    #[serde(default)]
    pub taxes_rate: f32,
    /// Subtotal excluding taxes, in cents.
    #[serde(default)]
    pub sub_total_excluding_taxes_amount_cents: i64,
    /// Coupon adjustment in cents.
    #[serde(default)]
    pub coupons_adjustment_amount_cents: i64,

    /// PDF download URL, once generated.
    #[serde(default)]
    pub file_url: String,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Credited fees.
    #[serde(default)]
    pub items: Vec<CreditNoteItem>,
    /// Taxes applied.
    #[serde(default)]
    pub applied_taxes: Vec<CreditNoteAppliedTax>,
}

/// Estimate of the credit note a set of fees would produce.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteEstimated {
    /// Invoice the credit note would offset.
    #[serde(default)]
    pub subrow_invoice_id: Option<Uuid>,
    /// Number of the offset invoice.
    #[serde(default)]
    pub invoice_number: String,

    /// Document currency.
    #[serde(default)]
    pub currency: Currency,
    /// Maximum creditable amount in cents.
    #[serde(default)]
    pub max_creditable_amount_cents: i64,
    /// Maximum refundable amount in cents.
    #[serde(default)]
    pub max_refundable_amount_cents: i64,
    /// Taxes total in cents.
    #[serde(default)]
    pub taxes_amount_cents: i64,
    /// Applied tax rate, as a percentage.
    #[serde(default)]
    pub taxes_rate: f32,
    /// Subtotal excluding taxes, in cents.
    #[serde(default)]
    pub sub_total_excluding_taxes_amount_cents: i64,
    /// Coupon adjustment in cents.
    #[serde(default)]
    pub coupons_adjustment_amount_cents: i64,

    /// Estimated items.
    #[serde(default)]
    pub items: Vec<CreditNoteEstimatedItem>,

    /// Estimated taxes.
    #[serde(default)]
    pub applied_taxes: Vec<CreditNoteEstimatedAppliedTax>,
}

/// One estimated credit-note item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteEstimatedItem {
    /// Credited amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Fee the item credits.
    #[serde(default)]
    pub subrow_fee_id: Option<Uuid>,
}

/// One estimated applied tax.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteEstimatedAppliedTax {
    /// Tax definition applied.
    #[serde(default)]
    pub subrow_tax_id: Option<Uuid>,
    /// Tax name.
    #[serde(default)]
    pub tax_name: String,
    /// Tax code.
    #[serde(default)]
    pub tax_code: String,
    /// Rate, as a percentage.
    #[serde(default)]
    pub tax_rate: f32,
    /// Tax description.
    #[serde(default)]
    pub tax_description: String,
    /// Taxed amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Taxed amount currency.
    #[serde(default)]
    pub amount_currency: Currency,
}

/// One fee to credit when creating a credit note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditNoteItemInput {
    /// Fee to credit.
    #[serde(rename = "fee_id")]
    pub subrow_fee_id: Uuid,
    /// Amount to credit, in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
}

/// Creation payload for a credit note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditNoteInput {
    /// Invoice to offset.
    #[serde(rename = "invoice_id")]
    pub subrow_invoice_id: Uuid,
    /// Reason for issuing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CreditNoteReason>,
    /// Fees to credit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CreditNoteItemInput>,
    /// Amount to credit, in cents.
    #[serde(rename = "refund_amount_cents", skip_serializing_if = "Option::is_none")]
    pub credit_amount_cents: Option<i64>,
    /// Amount to refund, in cents.
    #[serde(rename = "credit_amount_cents", skip_serializing_if = "Option::is_none")]
    pub refund_amount_cents: Option<i64>,
}

/// Update payload for a credit note.
#[derive(Debug, Clone, Serialize)]
pub struct CreditNoteUpdateInput {
    /// Credit note to update.
    #[serde(rename = "id")]
    pub subrow_id: Uuid,
    /// New refund status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_status: Option<CreditNoteRefundStatus>,
}

/// Payload for estimating a credit note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditNoteEstimateInput {
    /// Invoice to offset.
    #[serde(rename = "invoice_id")]
    pub subrow_invoice_id: Uuid,
    /// Fees to credit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CreditNoteItemInput>,
}

/// One page of credit notes plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditNoteListResponse {
    /// Credit notes on this page.
    #[serde(default)]
    pub credit_notes: Vec<CreditNote>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: PaginationMeta,
}

#[derive(Debug, Deserialize)]
struct CreditNoteEnvelope {
    credit_note: CreditNote,
}

#[derive(Debug, Deserialize)]
struct CreditNoteEstimatedEnvelope {
    credit_note_estimated: CreditNoteEstimated,
}

#[derive(Debug, Serialize)]
struct CreditNoteParams<'a> {
    credit_note: &'a CreditNoteInput,
}

#[derive(Debug, Serialize)]
struct CreditNoteUpdateParams<'a> {
    credit_note: &'a CreditNoteUpdateInput,
}

#[derive(Debug, Serialize)]
struct CreditNoteEstimateParams<'a> {
    credit_note: &'a CreditNoteEstimateInput,
}

impl Client {
    /// Credit-note endpoints.
    #[must_use]
    pub fn credit_note(&self) -> CreditNoteRequest<'_> {
        CreditNoteRequest { client: self }
    }
}

impl CreditNoteRequest<'_> {
    /// Fetch one credit note.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get(&self, credit_note_id: Uuid) -> Result<CreditNote, Error> {
        let request = ClientRequest::new(format!("credit_notes/{credit_note_id}"));
        let envelope: CreditNoteEnvelope = self.client.get(&request).await?;
        Ok(envelope.credit_note)
    }

    /// List credit notes matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_list(
        &self,
        input: &CreditNoteListInput,
    ) -> Result<CreditNoteListResponse, Error> {
        let request = ClientRequest::new("credit_notes").with_query(input.query_params());
        self.client.get(&request).await
    }

    /// Create a credit note against an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create(&self, input: &CreditNoteInput) -> Result<CreditNote, Error> {
        let request = ClientRequest::new("credit_notes");
        let params = CreditNoteParams { credit_note: input };
        let envelope: Option<CreditNoteEnvelope> =
            self.client.post(&request, Some(&params)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.credit_note)
    }

    /// Update a credit note's refund status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update(&self, input: &CreditNoteUpdateInput) -> Result<CreditNote, Error> {
        let request = ClientRequest::new(format!("credit_notes/{}", input.subrow_id));
        let params = CreditNoteUpdateParams { credit_note: input };
        let envelope: Option<CreditNoteEnvelope> = self.client.put(&request, Some(&params)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.credit_note)
    }

    /// Void the remaining credit of a credit note.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn void(&self, credit_note_id: Uuid) -> Result<Option<CreditNote>, Error> {
        let request = ClientRequest::new(format!("credit_notes/{credit_note_id}/void"));
        let envelope: Option<CreditNoteEnvelope> = self.client.put(&request, None::<&()>).await?;
        Ok(envelope.map(|envelope| envelope.credit_note))
    }

    /// Trigger PDF generation and return the credit note once the document
    /// exists. Generation may run asynchronously, in which case no body
    /// comes back.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn download(&self, credit_note_id: Uuid) -> Result<Option<CreditNote>, Error> {
        let request = ClientRequest::new(format!("credit_notes/{credit_note_id}/download"));
        let envelope: Option<CreditNoteEnvelope> =
            self.client.post_without_body(&request).await?;
        Ok(envelope.map(|envelope| envelope.credit_note))
    }

    /// Estimate the credit note a set of fees would produce, without
    /// creating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn estimate(
        &self,
        input: &CreditNoteEstimateInput,
    ) -> Result<CreditNoteEstimated, Error> {
        let request = ClientRequest::new("credit_notes/estimate");
        let params = CreditNoteEstimateParams { credit_note: input };
        let envelope: Option<CreditNoteEstimatedEnvelope> =
            self.client.post(&request, Some(&params)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.credit_note_estimated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_input_emits_only_set_fields() {
        let input = CreditNoteListInput {
            per_page: Some(20),
            page: Some(2),
            external_customer_id: Some("cust_1".to_string()),
        };
        let params = input.query_params();
        assert_eq!(params.len(), 3);
        assert_eq!(params["per_page"], "20");
        assert_eq!(params["page"], "2");
        assert_eq!(params["external_customer_id"], "cust_1");

        assert!(CreditNoteListInput::default().query_params().is_empty());
    }

    #[test]
    fn unknown_reason_decodes_as_opaque_string() {
        let reason: CreditNoteReason = serde_json::from_str("\"goodwill\"").unwrap();
        assert_eq!(reason, CreditNoteReason::Unknown("goodwill".to_string()));

        let known: CreditNoteReason = serde_json::from_str("\"order_change\"").unwrap();
        assert_eq!(known, CreditNoteReason::OrderChange);
    }

    #[test]
    fn update_input_serializes_id_key() {
        let input = CreditNoteUpdateInput {
            subrow_id: Uuid::nil(),
            refund_status: Some(CreditNoteRefundStatus::Refunded),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["id"], Uuid::nil().to_string());
        assert_eq!(json["refund_status"], "refunded");
    }

    #[test]
    fn item_input_serializes_fee_id_key() {
        let input = CreditNoteItemInput {
            subrow_fee_id: Uuid::nil(),
            amount_cents: Some(250),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["fee_id"], Uuid::nil().to_string());
        assert_eq!(json["amount_cents"], 250);
    }
}
