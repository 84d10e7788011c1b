//! Integration tests for the IremboPay client against a mock API server.
//!
//! Each test starts a `wiremock` server, points the client at it over plain
//! HTTP, and checks what goes over the wire and how responses are classified.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use irembopay::adapters::ApiRequest;
use irembopay::domain::{
    parse_time, BatchInvoiceRequest, InvoiceRequest, MomoPaymentRequest, MomoProvider,
    PaymentItem, PaymentStatus,
};
use irembopay::{IdempotencyKey, IremboPayClient, IremboPayConfig, IremboPayError, PaymentGateway};

// ════════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════════

const SECRET: &str = "sk_test_secret";

fn config_for(server: &MockServer) -> IremboPayConfig {
    IremboPayConfig {
        host: Some(server.address().to_string()),
        scheme: "http".to_string(),
        request_timeout_secs: 1,
        ..IremboPayConfig::sandbox(SECRET)
    }
}

fn client_for(server: &MockServer) -> IremboPayClient {
    IremboPayClient::new(&config_for(server)).unwrap()
}

fn invoice_json(invoice_number: &str) -> Value {
    json!({
        "amount": 3000,
        "invoiceNumber": invoice_number,
        "transactionId": "TX-1",
        "createdAt": "2024-03-15T08:30:00+02:00",
        "paymentAccountIdentifier": "PI-001",
        "paymentItems": [{"code": "PC-001", "quantity": 2, "unitAmount": 1500}],
        "type": "SINGLE",
        "paymentStatus": "NEW",
        "currency": "RWF",
        "paymentLinkUrl": "https://checkout.sandbox.irembopay.com/880419623157"
    })
}

fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "OK",
        "data": data
    }))
}

fn invoice_request() -> InvoiceRequest {
    InvoiceRequest::new("TX-1", "PI-001", vec![PaymentItem::new("PC-001", 2, 1500.0)])
}

// ════════════════════════════════════════════════════════════════════════════════
// Request Shape
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_invoice_sends_default_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/invoices"))
        .and(header("irembopay-secretKey", SECRET))
        .and(header("X-API-Version", "2"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({
            "transactionId": "TX-1",
            "paymentAccountIdentifier": "PI-001",
            "paymentItems": [{"code": "PC-001", "quantity": 2, "unitAmount": 1500.0}]
        })))
        .respond_with(success(invoice_json("880419623157")))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = client_for(&server)
        .create_invoice(&invoice_request(), None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(invoice.invoice_number, "880419623157");
    assert_eq!(invoice.payment_status, PaymentStatus::New);
}

#[tokio::test]
async fn idempotency_key_is_sent_as_header() {
    let server = MockServer::start().await;
    let key = IdempotencyKey::derive("invoice", "TX-1");

    Mock::given(method("POST"))
        .and(path("/payments/invoices"))
        .and(header("Idempotency-Key", key.as_str()))
        .respond_with(success(invoice_json("880419623157")))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .create_invoice(&invoice_request(), Some(&key), &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn caller_header_overrides_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices"))
        .and(header("X-API-Version", "3"))
        .and(query_param("status", "PAID"))
        .and(query_param("q", "a b&c"))
        .respond_with(success(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::get("/payments/invoices")
        .with_header("X-API-Version", "3")
        .with_query("status", "PAID")
        .with_query("q", "a b&c");

    let result: Vec<Value> = client_for(&server)
        .transport()
        .execute(request, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn get_invoice_encodes_reference() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/TX%201"))
        .respond_with(success(invoice_json("880419623157")))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = client_for(&server)
        .get_invoice("TX 1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(invoice.transaction_id, "TX-1");
}

#[tokio::test]
async fn update_expiry_time_sends_only_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/payments/invoices/880419623157"))
        .and(body_json(json!({"expiryAt": "2024-06-01T12:00:00Z"})))
        .respond_with(success(invoice_json("880419623157")))
        .expect(1)
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    client_for(&server)
        .update_expiry_time("880419623157", at, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_invoice_with_expiry_sets_future_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/invoices"))
        .respond_with(success(invoice_json("880419623157")))
        .expect(1)
        .mount(&server)
        .await;

    let before = Utc::now();
    client_for(&server)
        .create_invoice_with_expiry(
            &invoice_request(),
            Duration::from_secs(3600),
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let expiry = parse_time(body["expiryAt"].as_str().unwrap()).unwrap();

    let delta = expiry.with_timezone(&Utc) - before;
    assert!(delta.num_seconds() >= 3599 && delta.num_seconds() <= 3601);
}

#[tokio::test]
async fn create_batch_invoice_posts_to_batch_path() {
    let server = MockServer::start().await;

    let mut batch = invoice_json("BATCH-1");
    batch["type"] = json!("BATCH");
    batch["childInvoices"] = json!(["A", "B"]);

    Mock::given(method("POST"))
        .and(path("/payments/invoices/batch"))
        .and(body_json(json!({"transactionId": "TX-B", "invoiceNumbers": ["A", "B"]})))
        .respond_with(success(batch))
        .expect(1)
        .mount(&server)
        .await;

    let request = BatchInvoiceRequest {
        transaction_id: "TX-B".to_string(),
        invoice_numbers: vec!["A".to_string(), "B".to_string()],
        description: None,
    };
    let invoice = client_for(&server)
        .create_batch_invoice(&request, None, &CancellationToken::new())
        .await
        .unwrap();

    assert!(invoice.is_batch());
    assert_eq!(invoice.child_invoices, vec!["A", "B"]);
}

#[tokio::test]
async fn initiate_momo_payment_returns_reference() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/transactions/initiate"))
        .and(body_json(json!({
            "accountIdentifier": "0781110011",
            "paymentProvider": "MTN",
            "invoiceNumber": "880419623157"
        })))
        .respond_with(success(json!({
            "accountIdentifier": "0781110011",
            "paymentProvider": "MTN",
            "invoiceNumber": "880419623157",
            "amount": 3000,
            "referenceId": "MTN-REF-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = MomoPaymentRequest::new("0781110011", MomoProvider::Mtn, "880419623157");
    let response = client_for(&server)
        .initiate_momo_payment(&request, None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.reference_id, "MTN-REF-1");
    assert_eq!(response.amount, 3000.0);
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Classification
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn not_found_uses_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_invoice("missing", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let api = err.api_error().unwrap();
    assert_eq!(api.message, "not found");
    assert_eq!(api.body, r#"{"message":"not found"}"#);
}

#[tokio::test]
async fn bad_request_prefers_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/invoices"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"success":false,"message":"validation","error":"bad request"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_invoice(&invoice_request(), None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.api_error().unwrap().message, "bad request");
}

#[tokio::test]
async fn non_json_error_body_becomes_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/x"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_invoice("x", &CancellationToken::new())
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert!(api.is_server_error());
    assert_eq!(api.message, "Bad Gateway");
}

#[tokio::test]
async fn unsuccessful_envelope_is_logical_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/invoices"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success":false,"message":"duplicate transaction"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_invoice(&invoice_request(), None, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        IremboPayError::Unsuccessful { message } => assert_eq!(message, "duplicate transaction"),
        other => panic!("expected Unsuccessful, got {:?}", other),
    }
}

#[tokio::test]
async fn mismatched_data_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/x"))
        .respond_with(success(json!({"invoiceNumber": 42})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_invoice("x", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IremboPayError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn dispatch_ignores_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/ping"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .transport()
        .dispatch(ApiRequest::post("/payments/ping"), &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn dispatch_still_classifies_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/ping"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"unauthorized"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .transport()
        .dispatch(ApiRequest::post("/payments/ping"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.api_error().unwrap().is_unauthorized());
}

// ════════════════════════════════════════════════════════════════════════════════
// Cancellation and Timeouts
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn cancellation_aborts_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/slow"))
        .respond_with(success(invoice_json("slow")).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = client_for(&server)
        .get_invoice("slow", &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/invoices/slow"))
        .respond_with(success(invoice_json("slow")).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_invoice("slow", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IremboPayError::Timeout { timeout_secs: 1 }));
}
