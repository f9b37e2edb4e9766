//! Invoice endpoints and wire types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing_period::BillingPeriod;
use crate::client::{Client, ClientRequest, QueryParams};
use crate::error::Error;
use crate::types::{
    CouponInput, Currency, Customer, CustomerInput, Fee, PaginationMeta, Subscription,
    SubscriptionsInput,
};
use crate::usage_threshold::AppliedUsageThreshold;

/// Invoice type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    /// Subscription invoice.
    Subscription,
    /// Add-on invoice.
    AddOn,
    /// Credit purchase invoice.
    Credit,
    /// One-off invoice.
    OneOff,
    /// Progressive-billing invoice.
    ProgressiveBilling,
    /// Type not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Draft, still editable.
    Draft,
    /// Finalized and numbered.
    Finalized,
    /// Generation failed.
    Failed,
    /// Voided.
    Voided,
    /// Pending generation.
    Pending,
    /// Status not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

impl InvoiceStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
            Self::Voided => "voided",
            Self::Pending => "pending",
            Self::Other(status) => status,
        }
    }
}

/// Invoice payment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoicePaymentStatus {
    /// Payment pending.
    Pending,
    /// Payment succeeded.
    Succeeded,
    /// Payment failed.
    Failed,
    /// Status not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

impl InvoicePaymentStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }
}

/// Kind of record an invoice credit points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceCreditItemType {
    /// Coupon credit.
    Coupon,
    /// Credit-note credit.
    CreditNote,
    /// Invoice credit.
    Invoice,
    /// Kind not in the known set, passed through verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Access to the invoice endpoints.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceRequest<'a> {
    client: &'a Client,
}

/// Metadata entry sent with invoice updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceMetadataInput {
    /// Identifier of an existing entry, absent when creating one.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub subrow_id: Option<Uuid>,
    /// Metadata key.
    pub key: String,
    /// Metadata value.
    pub value: String,
}

/// Fee description for one-off invoices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceFeesInput {
    /// Add-on code the fee bills.
    pub add_on_code: String,
    /// Display name overriding the add-on name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_display_name: Option<String>,
    /// Unit price in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount_cents: Option<i64>,
    /// Fee description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of billed units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<f32>,
    /// Tax codes applied to the fee.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tax_codes: Vec<String>,
}

/// Metadata entry attached to an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceMetadataResponse {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Metadata key.
    #[serde(default)]
    pub key: String,
    /// Metadata value.
    #[serde(default)]
    pub value: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Update payload for an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceInput {
    /// Invoice to update.
    pub subrow_id: Uuid,
    /// New payment status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<InvoicePaymentStatus>,
    /// Metadata entries to set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<InvoiceMetadataInput>,
}

/// Creation payload for a one-off invoice.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceOneOffInput {
    /// Customer ID in the caller's system.
    pub external_customer_id: String,
    /// Invoice currency.
    pub currency: String,
    /// Fees to bill.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fees: Vec<InvoiceFeesInput>,
    /// Skip the payment service provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_psp: Option<bool>,
}

/// Payload for previewing an invoice before it exists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoicePreviewInput {
    /// Plan code to preview against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
    /// Billing time (calendar or anniversary).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_time: Option<String>,
    /// Subscription start, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_at: Option<String>,
    /// Coupons applied in the preview.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coupons: Vec<CouponInput>,
    /// Customer the preview bills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInput>,
    /// Subscriptions the preview covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<SubscriptionsInput>,
    /// Billing entity issuing the preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_entity_code: Option<String>,
}

/// Filters for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceListInput {
    /// Page size.
    pub per_page: Option<u32>,
    /// Page number.
    pub page: Option<u32>,

    /// Lower bound on issuing date, ISO 8601 date.
    pub issuing_date_from: Option<String>,
    /// Upper bound on issuing date, ISO 8601 date.
    pub issuing_date_to: Option<String>,

    /// Restrict to one customer.
    pub external_customer_id: Option<String>,
    /// Restrict to one lifecycle status.
    pub status: Option<InvoiceStatus>,
    /// Restrict to one payment status.
    pub payment_status: Option<InvoicePaymentStatus>,
    /// Restrict to overdue invoices.
    pub payment_overdue: Option<bool>,

    /// Lower bound on total amount, in cents.
    pub amount_from: Option<i64>,
    /// Upper bound on total amount, in cents.
    pub amount_to: Option<i64>,
}

impl QueryParams for InvoiceListInput {
    fn query_params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        if let Some(per_page) = self.per_page {
            params.insert("per_page", per_page.to_string());
        }
        if let Some(page) = self.page {
            params.insert("page", page.to_string());
        }
        if let Some(from) = self.issuing_date_from.as_deref().filter(|v| !v.is_empty()) {
            params.insert("issuing_date_from", from.to_string());
        }
        if let Some(to) = self.issuing_date_to.as_deref().filter(|v| !v.is_empty()) {
            params.insert("issuing_date_to", to.to_string());
        }
        if let Some(id) = self
            .external_customer_id
            .as_deref()
            .filter(|v| !v.is_empty())
        {
            params.insert("external_customer_id", id.to_string());
        }
        if let Some(status) = &self.status {
            params.insert("status", status.as_str().to_string());
        }
        if let Some(payment_status) = &self.payment_status {
            params.insert("payment_status", payment_status.as_str().to_string());
        }
        if let Some(payment_overdue) = self.payment_overdue {
            params.insert("payment_overdue", payment_overdue.to_string());
        }
        if let Some(amount_from) = self.amount_from {
            params.insert("amount_from", amount_from.to_string());
        }
        if let Some(amount_to) = self.amount_to {
            params.insert("amount_to", amount_to.to_string());
        }
        params
    }
}

/// Record an invoice credit points at.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCreditItem {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Kind of record.
    #[serde(rename = "type", default)]
    pub item_type: Option<InvoiceCreditItemType>,
    /// Record code.
    #[serde(default)]
    pub code: String,
    /// Record name.
    #[serde(default)]
    pub name: String,
}

/// Minimal invoice reference embedded in credits.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSummary {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<InvoicePaymentStatus>,
}

/// A credit applied to an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCredit {
    /// Record the credit comes from.
    #[serde(default)]
    pub item: Option<InvoiceCreditItem>,
    /// Invoice the credit applies to.
    #[serde(default)]
    pub invoice: Option<InvoiceSummary>,
    /// SubRow identifier of the credited record.
    #[serde(default)]
    pub subrow_item_id: Option<Uuid>,
    /// Credited amount in cents.
    #[serde(default)]
    pub amount_cents: i64,
    /// Credited amount currency.
    #[serde(default)]
    pub amount_currency: Currency,
    /// Whether the credit applies before taxes.
    #[serde(default)]
    pub before_taxes: bool,
}

/// A custom section rendered on an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceAppliedInvoiceCustomSection {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Invoice the section is rendered on.
    #[serde(default)]
    pub subrow_invoice_id: Option<Uuid>,
    /// Section code.
    #[serde(default)]
    pub code: String,
    /// Section body.
    #[serde(default)]
    pub details: String,
    /// Section heading.
    #[serde(default)]
    pub display_name: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A tax applied to a whole invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceAppliedTax {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Invoice the tax applies to.
    #[serde(default)]
    pub subrow_invoice_id: Option<Uuid>,
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
    /// Fee base the tax was computed on, in cents.
    #[serde(default)]
    pub fees_amount_cents: i64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A generation error attached to an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceErrorDetail {
    /// SubRow identifier.
    #[serde(default)]
    pub subrow_id: Option<Uuid>,
    /// Machine-readable error code.
    #[serde(default)]
    pub error_code: String,
    /// Provider-specific details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// An invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    /// SubRow identifier.
    pub subrow_id: Uuid,
    /// Sequential number within the billing entity.
    #[serde(default)]
    pub sequential_id: i64,
    /// Billing entity that issued the invoice.
    #[serde(default)]
    pub billing_entity_code: String,
    /// Document number.
    #[serde(default)]
    pub number: String,

    /// Issuing date, ISO 8601 date.
    #[serde(default)]
    pub issuing_date: String,
    /// When a payment dispute was lost, if ever.
    #[serde(default)]
    pub payment_dispute_lost_at: Option<DateTime<Utc>>,
    /// Payment due date, ISO 8601 date.
    #[serde(default)]
    pub payment_due_date: String,
    /// Whether payment is overdue.
    #[serde(default)]
    pub payment_overdue: bool,

    /// Invoice type.
    pub invoice_type: InvoiceType,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Payment status.
    pub payment_status: InvoicePaymentStatus,

    /// Invoice currency.
    #[serde(default)]
    pub currency: Currency,

    /// Fees total in cents.
    #[serde(default)]
    pub fees_amount_cents: i64,
    /// Taxes total in cents.
    #[serde(default)]
    pub taxes_amount_cents: i64,
    /// Coupons total in cents.
    #[serde(default)]
    pub coupons_amount_cents: i64,
    /// Credit notes total in cents.
    #[serde(default)]
    pub credit_notes_amount_cents: i64,
    /// Subtotal excluding taxes, in cents.
    #[serde(default)]
    pub sub_total_excluding_taxes_amount_cents: i64,
    /// Subtotal including taxes, in cents.
    #[serde(default)]
    pub sub_total_including_taxes_amount_cents: i64,
    /// Grand total in cents.
    #[serde(default)]
    pub total_amount_cents: i64,
    /// Amount still due, in cents.
    #[serde(default)]
    pub total_due_amount_cents: i64,
    /// Prepaid credit applied, in cents.
    #[serde(default)]
    pub prepaid_credit_amount_cents: i64,
    /// Progressive-billing credit applied, in cents.
    #[serde(default)]
    pub progressive_billing_credit_amount_cents: i64,
    /// Net payment term in days.
    #[serde(default)]
    pub net_payment_term: i64,

    /// PDF download URL, once generated.
    #[serde(default)]
    pub file_url: String,
    /// Metadata entries.
    #[serde(default)]
    pub metadata: Vec<InvoiceMetadataResponse>,
    /// Document version.
    #[serde(default)]
    pub version_number: i64,

    /// Billed customer.
    #[serde(default)]
    pub customer: Option<Customer>,
    /// Billing periods the invoice covers.
    #[serde(default)]
    pub billing_periods: Vec<BillingPeriod>,
    /// Subscriptions the invoice bills.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,

    /// Billed fees.
    #[serde(default)]
    pub fees: Vec<Fee>,
    /// Credits applied.
    #[serde(default)]
    pub credits: Vec<InvoiceCredit>,
    /// Custom sections rendered on the document.
    #[serde(default)]
    pub applied_invoice_custom_sections: Vec<InvoiceAppliedInvoiceCustomSection>,
    /// Taxes applied.
    #[serde(default)]
    pub applied_taxes: Vec<InvoiceAppliedTax>,
    /// Generation errors.
    #[serde(default)]
    pub error_details: Vec<InvoiceErrorDetail>,
    /// Usage thresholds crossed during the period.
    #[serde(default)]
    pub applied_usage_threshold: Vec<AppliedUsageThreshold>,
}

/// Hosted payment page for an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoicePaymentUrl {
    /// Payment page URL.
    #[serde(default)]
    pub payment_url: String,
}

/// Options for voiding an invoice.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoidInvoiceOptions {
    /// Also generate a credit note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_credit_note: Option<bool>,
    /// Amount to refund, in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<i64>,
    /// Amount to credit, in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_amount: Option<i64>,
}

/// One page of invoices plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceListResponse {
    /// Invoices on this page.
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: PaginationMeta,
}

#[derive(Debug, Deserialize)]
struct InvoiceEnvelope {
    invoice: Invoice,
}

#[derive(Debug, Deserialize)]
struct InvoicePaymentUrlEnvelope {
    invoice_payment_url: InvoicePaymentUrl,
}

#[derive(Debug, Serialize)]
struct InvoiceParams<'a> {
    invoice: &'a InvoiceInput,
}

#[derive(Debug, Serialize)]
struct InvoiceOneOffParams<'a> {
    invoice: &'a InvoiceOneOffInput,
}

impl Client {
    /// Invoice endpoints.
    #[must_use]
    pub fn invoice(&self) -> InvoiceRequest<'_> {
        InvoiceRequest { client: self }
    }
}

impl InvoiceRequest<'_> {
    /// Fetch one invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get(&self, invoice_id: Uuid) -> Result<Invoice, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}"));
        let envelope: InvoiceEnvelope = self.client.get(&request).await?;
        Ok(envelope.invoice)
    }

    /// List invoices matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_list(&self, input: &InvoiceListInput) -> Result<InvoiceListResponse, Error> {
        let request = ClientRequest::new("invoices").with_query(input.query_params());
        self.client.get(&request).await
    }

    /// Create a one-off invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create(&self, input: &InvoiceOneOffInput) -> Result<Invoice, Error> {
        let request = ClientRequest::new("invoices");
        let params = InvoiceOneOffParams { invoice: input };
        let envelope: Option<InvoiceEnvelope> = self.client.post(&request, Some(&params)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.invoice)
    }

    /// Preview the invoice a subscription would produce.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn preview(&self, input: &InvoicePreviewInput) -> Result<Invoice, Error> {
        let request = ClientRequest::new("invoices/preview");
        let envelope: Option<InvoiceEnvelope> = self.client.post(&request, Some(input)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.invoice)
    }

    /// Update an invoice's payment status or metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update(&self, input: &InvoiceInput) -> Result<Invoice, Error> {
        let request = ClientRequest::new(format!("invoices/{}", input.subrow_id));
        let params = InvoiceParams { invoice: input };
        let envelope: Option<InvoiceEnvelope> = self.client.put(&request, Some(&params)).await?;
        let envelope = envelope.ok_or_else(|| Error::empty_response(request.path()))?;
        Ok(envelope.invoice)
    }

    /// Trigger PDF generation and return the invoice once the document
    /// exists. Generation may run asynchronously, in which case no body
    /// comes back.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn download(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/download"));
        let envelope: Option<InvoiceEnvelope> = self.client.post_without_body(&request).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Recompute a draft invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn refresh(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/refresh"));
        let envelope: Option<InvoiceEnvelope> = self.client.put(&request, None::<&()>).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Retry generation of a failed invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn retry(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/retry"));
        let envelope: Option<InvoiceEnvelope> = self.client.post(&request, None::<&()>).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Finalize a draft invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn finalize(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/finalize"));
        let envelope: Option<InvoiceEnvelope> = self.client.put(&request, None::<&()>).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Void a finalized invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn void(
        &self,
        invoice_id: Uuid,
        options: Option<&VoidInvoiceOptions>,
    ) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/void"));
        let envelope: Option<InvoiceEnvelope> = self.client.post(&request, options).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Mark a payment dispute as lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn lose_dispute(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/lose_dispute"));
        let envelope: Option<InvoiceEnvelope> = self.client.put(&request, None::<&()>).await?;
        Ok(envelope.map(|envelope| envelope.invoice))
    }

    /// Retry payment collection for an invoice. The retry is processed
    /// asynchronously server-side, so no invoice comes back.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn retry_payment(&self, invoice_id: Uuid) -> Result<Option<Invoice>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/retry_payment"));
        let _: Option<InvoiceEnvelope> = self.client.post_without_body(&request).await?;
        Ok(None)
    }

    /// Generate a hosted payment page URL for an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn payment_url(&self, invoice_id: Uuid) -> Result<Option<InvoicePaymentUrl>, Error> {
        let request = ClientRequest::new(format!("invoices/{invoice_id}/payment_url"));
        let envelope: Option<InvoicePaymentUrlEnvelope> =
            self.client.post_without_body(&request).await?;
        Ok(envelope.map(|envelope| envelope.invoice_payment_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_input_omits_empty_fields() {
        let input = InvoiceListInput::default();
        assert!(input.query_params().is_empty());

        let input = InvoiceListInput {
            external_customer_id: Some(String::new()),
            issuing_date_from: Some(String::new()),
            ..InvoiceListInput::default()
        };
        assert!(input.query_params().is_empty());
    }

    #[test]
    fn list_input_encodes_numbers_as_decimal_strings() {
        let input = InvoiceListInput {
            per_page: Some(20),
            page: Some(2),
            amount_from: Some(1_000),
            payment_overdue: Some(true),
            status: Some(InvoiceStatus::Finalized),
            payment_status: Some(InvoicePaymentStatus::Pending),
            ..InvoiceListInput::default()
        };
        let params = input.query_params();
        assert_eq!(params["per_page"], "20");
        assert_eq!(params["page"], "2");
        assert_eq!(params["amount_from"], "1000");
        assert_eq!(params["payment_overdue"], "true");
        assert_eq!(params["status"], "finalized");
        assert_eq!(params["payment_status"], "pending");
    }

    #[test]
    fn unknown_status_decodes_as_opaque_string() {
        let status: InvoiceStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, InvoiceStatus::Other("archived".to_string()));
        assert_eq!(status.as_str(), "archived");

        let known: InvoiceStatus = serde_json::from_str("\"finalized\"").unwrap();
        assert_eq!(known, InvoiceStatus::Finalized);
    }

    #[test]
    fn void_options_omit_unset_fields() {
        let options = VoidInvoiceOptions::default();
        assert_eq!(serde_json::to_string(&options).unwrap(), "{}");

        let options = VoidInvoiceOptions {
            generate_credit_note: Some(true),
            refund_amount: Some(500),
            credit_amount: None,
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["generate_credit_note"], true);
        assert_eq!(json["refund_amount"], 500);
        assert!(json.get("credit_amount").is_none());
    }

    #[test]
    fn invoice_decodes_with_minimal_fields() {
        let invoice: Invoice = serde_json::from_value(serde_json::json!({
            "subrow_id": "3f1e2a54-9c1f-4f6e-9f5a-0d9c8f3a1b2c",
            "invoice_type": "subscription",
            "status": "draft",
            "payment_status": "pending"
        }))
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.total_amount_cents, 0);
        assert!(invoice.fees.is_empty());
        assert!(invoice.customer.is_none());
    }
}
