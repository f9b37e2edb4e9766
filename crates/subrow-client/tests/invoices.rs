//! Invoice endpoint integration tests against a mock SubRow API.

use serde_json::json;
use subrow_client::{
    Client, Error, InvoiceInput, InvoiceListInput, InvoiceOneOffInput, InvoicePaymentStatus,
    InvoicePreviewInput, InvoiceStatus,
};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Minimal invoice body the mock server echoes back.
fn invoice_json(invoice_id: Uuid) -> serde_json::Value {
    json!({
        "subrow_id": invoice_id,
        "sequential_id": 15,
        "number": "SUB-2024-015",
        "issuing_date": "2024-06-30",
        "invoice_type": "subscription",
        "status": "finalized",
        "payment_status": "pending",
        "currency": "USD",
        "fees_amount_cents": 10_000,
        "taxes_amount_cents": 2_000,
        "total_amount_cents": 12_000
    })
}

// ============================================================================
// Get / list
// ============================================================================

#[tokio::test]
async fn get_returns_decoded_invoice() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/invoices/{invoice_id}")))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let invoice = client.invoice().get(invoice_id).await.unwrap();

    assert_eq!(invoice.subrow_id, invoice_id);
    assert_eq!(invoice.status, InvoiceStatus::Finalized);
    assert_eq!(invoice.total_amount_cents, 12_000);
}

#[tokio::test]
async fn get_list_sends_exact_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoices": [invoice_json(Uuid::new_v4())],
            "meta": { "current_page": 2, "total_pages": 3, "total_count": 41 }
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let input = InvoiceListInput {
        per_page: Some(20),
        page: Some(2),
        external_customer_id: Some("cust_1".to_string()),
        ..InvoiceListInput::default()
    };
    let response = client.invoice().get_list(&input).await.unwrap();

    assert_eq!(response.invoices.len(), 1);
    assert_eq!(response.meta.total_count, 41);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("external_customer_id=cust_1&page=2&per_page=20")
    );
}

#[tokio::test]
async fn get_list_omits_empty_filters_entirely() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/invoices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoices": [], "meta": {} })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let input = InvoiceListInput {
        external_customer_id: Some(String::new()),
        ..InvoiceListInput::default()
    };
    let response = client.invoice().get_list(&input).await.unwrap();

    assert!(response.invoices.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ============================================================================
// Create / update
// ============================================================================

#[tokio::test]
async fn create_wraps_input_in_invoice_envelope() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/v1/invoices"))
        .and(body_json(json!({
            "invoice": {
                "external_customer_id": "cust_1",
                "currency": "USD"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let input = InvoiceOneOffInput {
        external_customer_id: "cust_1".to_string(),
        currency: "USD".to_string(),
        ..InvoiceOneOffInput::default()
    };
    let invoice = client.invoice().create(&input).await.unwrap();

    assert_eq!(invoice.subrow_id, invoice_id);
}

#[tokio::test]
async fn preview_posts_input_without_envelope() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    // Preview is the one creation call whose payload is not wrapped in an
    // `invoice` object.
    Mock::given(method("POST"))
        .and(path("/api/v1/invoices/preview"))
        .and(body_json(json!({
            "plan_code": "scale",
            "billing_time": "calendar"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let input = InvoicePreviewInput {
        plan_code: Some("scale".to_string()),
        billing_time: Some("calendar".to_string()),
        ..InvoicePreviewInput::default()
    };
    let invoice = client.invoice().preview(&input).await.unwrap();

    assert_eq!(invoice.subrow_id, invoice_id);
}

#[tokio::test]
async fn update_puts_wrapped_payment_status() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/invoices/{invoice_id}")))
        .and(body_json(json!({
            "invoice": {
                "subrow_id": invoice_id,
                "payment_status": "succeeded"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let input = InvoiceInput {
        subrow_id: invoice_id,
        payment_status: Some(InvoicePaymentStatus::Succeeded),
        metadata: Vec::new(),
    };
    let invoice = client.invoice().update(&input).await.unwrap();

    assert_eq!(invoice.subrow_id, invoice_id);
}

// ============================================================================
// Empty-body actions
// ============================================================================

#[tokio::test]
async fn void_with_empty_body_returns_none() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/invoices/{invoice_id}/void")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let result = client.invoice().void(invoice_id, None).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn finalize_with_empty_body_returns_none() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/invoices/{invoice_id}/finalize")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let result = client.invoice().finalize(invoice_id).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn refresh_with_body_returns_invoice() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/invoices/{invoice_id}/refresh")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let result = client.invoice().refresh(invoice_id).await.unwrap();

    assert_eq!(result.unwrap().subrow_id, invoice_id);
}

#[tokio::test]
async fn retry_payment_never_returns_an_invoice() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    // Even when the server sends a body, the retry is processed
    // asynchronously and no invoice is surfaced.
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/invoices/{invoice_id}/retry_payment")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "invoice": invoice_json(invoice_id) })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let result = client.invoice().retry_payment(invoice_id).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn payment_url_decodes_envelope() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/invoices/{invoice_id}/payment_url")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoice_payment_url": { "payment_url": "https://pay.subrow.dev/inv_15" }
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let result = client.invoice().payment_url(invoice_id).await.unwrap();

    assert_eq!(
        result.unwrap().payment_url,
        "https://pay.subrow.dev/inv_15"
    );
}

// ============================================================================
// Error paths
// ============================================================================

#[tokio::test]
async fn mismatched_payload_is_a_contract_violation() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    // Well-formed JSON without the `invoice` key the operation declared.
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/invoices/{invoice_id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "customer": { "name": "ACME" } })),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let err = client.invoice().get(invoice_id).await.unwrap_err();

    assert!(err.is_contract_violation());
    match err {
        Error::UnexpectedResponseType { path, .. } => {
            assert_eq!(path, format!("invoices/{invoice_id}"));
        }
        other => panic!("expected shape error, got: {other}"),
    }
}

#[tokio::test]
async fn api_error_envelope_maps_to_typed_error() {
    let server = MockServer::start().await;
    let invoice_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/invoices/{invoice_id}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": "Not Found",
            "code": "invoice_not_found"
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "test-api-key");
    let err = client.invoice().get(invoice_id).await.unwrap_err();

    match err {
        Error::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("invoice_not_found"));
        }
        other => panic!("expected API error, got: {other}"),
    }
}
