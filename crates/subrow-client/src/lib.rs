//! SubRow Client SDK.
//!
//! This crate provides a typed client for the SubRow subscription-billing
//! API: invoices, credit notes, billing periods, charges, and usage
//! thresholds. Every endpoint goes through one shared request pipeline,
//! so path construction, query encoding, body (de)serialization, and
//! error handling behave the same everywhere.
//!
//! # Example
//!
//! ```no_run
//! use subrow_client::{Client, InvoiceListInput};
//!
//! # async fn example() -> Result<(), subrow_client::Error> {
//! let client = Client::new("https://api.subrow.dev", "your-api-key");
//!
//! // List finalized invoices for one customer
//! let invoices = client
//!     .invoice()
//!     .get_list(&InvoiceListInput {
//!         per_page: Some(20),
//!         external_customer_id: Some("cust_1".to_string()),
//!         ..InvoiceListInput::default()
//!     })
//!     .await?;
//!
//! println!("{} invoices total", invoices.meta.total_count);
//! # Ok(())
//! # }
//! ```
//!
//! Unknown enum values coming back from the API decode as opaque strings
//! instead of failing, so new upstream statuses do not break existing
//! integrations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod billing_period;
mod charge;
mod client;
mod credit_note;
mod error;
mod health;
mod invoice;
mod invoice_custom_section;
mod types;
mod usage_threshold;

pub use billing_period::{BillingPeriod, InvoicingReason};
pub use charge::{Charge, ChargeFilter, ChargeModel};
pub use client::{Client, ClientOptions};
pub use credit_note::{
    CreditNote, CreditNoteAppliedTax, CreditNoteCreditStatus, CreditNoteEstimateInput,
    CreditNoteEstimated, CreditNoteEstimatedAppliedTax, CreditNoteEstimatedItem, CreditNoteInput,
    CreditNoteItem, CreditNoteItemInput, CreditNoteListInput, CreditNoteListResponse,
    CreditNoteReason, CreditNoteRefundStatus, CreditNoteRequest, CreditNoteUpdateInput,
};
pub use error::Error;
pub use health::HealthCheckResponse;
pub use invoice::{
    Invoice, InvoiceAppliedInvoiceCustomSection, InvoiceAppliedTax, InvoiceCredit,
    InvoiceCreditItem, InvoiceCreditItemType, InvoiceErrorDetail, InvoiceFeesInput, InvoiceInput,
    InvoiceListInput, InvoiceListResponse, InvoiceMetadataInput, InvoiceMetadataResponse,
    InvoiceOneOffInput, InvoicePaymentStatus, InvoicePaymentUrl, InvoicePreviewInput,
    InvoiceRequest, InvoiceStatus, InvoiceSummary, InvoiceType, VoidInvoiceOptions,
};
pub use invoice_custom_section::InvoiceCustomSection;
pub use types::{
    CouponInput, Currency, Customer, CustomerInput, Fee, PaginationMeta, Subscription,
    SubscriptionsInput, Tax,
};
pub use usage_threshold::{AppliedUsageThreshold, UsageThreshold, UsageThresholdInput};
