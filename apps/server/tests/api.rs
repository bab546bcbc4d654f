//! End-to-end route tests against an in-memory database.
//!
//! Each test builds the real router, drives it with `tower::ServiceExt::
//! oneshot` and asserts on status codes and JSON bodies - no sockets, no
//! mocks.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use kwpos_db::{Database, DbConfig};
use kwpos_server::{build_router, AppState};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState { db })
}

fn with_actor(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder
        .header("x-actor-id", "u1")
        .header("x-actor-name", "Cashier One")
        .header("x-actor-role", "cashier")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value, actor: bool) -> Request<Body> {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let builder = if actor { with_actor(builder) } else { builder };
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Creates a catalog item, returns its id.
async fn create_item(app: &Router, name_en: &str, price: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/api/items",
            json!({
                "name_en": name_en,
                "name_ar": name_en,
                "unit": "cbm",
                "price": price,
            }),
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn checkout_body(item_id: &str, qty: i64, line_total: &str) -> Value {
    json!({
        "lines": [{"item_id": item_id, "quantity": qty, "line_total": line_total}],
        "subtotal": line_total,
        "discount_total": "0.000",
        "total": line_total,
        "payment_method": "cash",
    })
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = app().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn mutating_routes_require_actor_headers() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post_json("/api/sales", json!({"lines": []}), false),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn checkout_round_trip() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let (status, sale) = send(&app, post_json("/api/sales", checkout_body(&sand, 2, "31.000"), true)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["status"], "completed");
    assert_eq!(sale["total"], "31.000");
    let number = sale["sale_number"].as_str().unwrap();
    assert!(number.starts_with("SALE-"));
    assert!(number.ends_with("-000001"));

    // lookup by business number returns the lines
    let (status, fetched) = send(&app, get(&format!("/api/sales/{number}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lines"][0]["name_en"], "Washed Sand");
    assert_eq!(fetched["lines"][0]["line_total"], "31.000");
}

#[tokio::test]
async fn percent_discount_checkout() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let body = json!({
        "lines": [{"item_id": sand, "quantity": 2, "line_total": "31.000"}],
        "discount": {"kind": "percent", "bps": 1000},
        "subtotal": "31.000",
        "discount_total": "3.100",
        "total": "27.900",
        "payment_method": "cash",
    });
    let (status, sale) = send(&app, post_json("/api/sales", body, true)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["subtotal"], "31.000");
    assert_eq!(sale["discount"], "3.100");
    assert_eq!(sale["total"], "27.900");
}

#[tokio::test]
async fn knet_without_reference_is_rejected() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let mut body = checkout_body(&sand, 1, "15.500");
    body["payment_method"] = json!("knet");

    let (status, error) = send(&app, post_json("/api/sales", body, true)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "validation_error");

    // nothing was persisted
    let (_, sales) = send(&app, get("/api/sales")).await;
    assert_eq!(sales.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn totals_mismatch_is_unprocessable() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let mut body = checkout_body(&sand, 2, "31.000");
    body["total"] = json!("30.000"); // client lowballs

    let (status, error) = send(&app, post_json("/api/sales", body, true)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "totals_mismatch");
}

#[tokio::test]
async fn unknown_sale_number_is_not_found() {
    let app = app().await;

    let (status, error) = send(&app, get("/api/sales/SALE-1999-000001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn refund_flow_and_state_conflicts() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let (_, sale) = send(&app, post_json("/api/sales", checkout_body(&sand, 2, "31.000"), true)).await;
    let sale_id = sale["id"].as_str().unwrap().to_string();

    let (status, refund) = send(
        &app,
        post_json(
            "/api/refunds",
            json!({"sale_id": sale_id, "reason": "customer returned delivery"}),
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(refund["amount"], "31.000");
    assert!(refund["refund_number"].as_str().unwrap().starts_with("REFUND-"));

    // the sale is now refunded
    let number = sale["sale_number"].as_str().unwrap();
    let (_, fetched) = send(&app, get(&format!("/api/sales/{number}"))).await;
    assert_eq!(fetched["status"], "refunded");

    // second refund conflicts
    let (status, error) = send(
        &app,
        post_json(
            "/api/refunds",
            json!({"sale_id": sale_id, "reason": "again"}),
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "invalid_state");

    // and so does cancelling it
    let (status, error) = send(
        &app,
        post_json(
            &format!("/api/sales/{sale_id}/cancel"),
            json!({"reason": "too late"}),
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "invalid_state");
}

#[tokio::test]
async fn daily_report_shape() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;
    send(&app, post_json("/api/sales", checkout_body(&sand, 2, "31.000"), true)).await;

    let (status, report) = send(&app, get("/api/reports/daily")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_sales_count"], 1);
    assert_eq!(report["total_revenue"], "31.000");

    let buckets = report["sales_by_payment"].as_array().unwrap();
    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets[0]["method"], "cash");
    assert_eq!(buckets[0]["total"], "31.000");
    assert_eq!(buckets[1]["total"], "0.000"); // knet took nothing

    assert_eq!(report["top_items"][0]["name_en"], "Washed Sand");
    assert_eq!(report["top_items"][0]["quantity"], 2);
}

#[tokio::test]
async fn csv_export_quotes_awkward_names() {
    let app = app().await;
    // a name containing the delimiter must come out quoted
    let item = create_item(&app, "Sand, Washed (fine)", "12.000").await;
    send(&app, post_json("/api/sales", checkout_body(&item, 3, "36.000"), true)).await;

    let response = app.clone().oneshot(get("/api/reports/sales-csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Sale Number,Date,Time,Cashier,Status,Total,Payment Method,Reference,Items"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Sand, Washed (fine) (3)\""));
    assert!(row.contains("36.000"));
    assert!(row.contains("completed"));
}

#[tokio::test]
async fn cancelled_sales_leave_report_and_export() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let (_, sale) = send(&app, post_json("/api/sales", checkout_body(&sand, 1, "15.500"), true)).await;
    let sale_id = sale["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        post_json(
            &format!("/api/sales/{sale_id}/cancel"),
            json!({"reason": "wrong delivery"}),
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, report) = send(&app, get("/api/reports/daily")).await;
    assert_eq!(report["total_sales_count"], 0);

    let response = app.clone().oneshot(get("/api/reports/sales-csv")).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text.lines().count(), 1); // header only
}

#[tokio::test]
async fn audit_log_records_the_day() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;
    send(&app, post_json("/api/sales", checkout_body(&sand, 1, "15.500"), true)).await;

    let (status, entries) = send(&app, get("/api/audit-logs?action=CREATE_SALE")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["actor_name"], "Cashier One");

    // unfiltered shows the item creation too
    let (_, all) = send(&app, get("/api/audit-logs")).await;
    assert!(all.as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn item_soft_delete_blocks_new_sales() {
    let app = app().await;
    let sand = create_item(&app, "Washed Sand", "15.500").await;

    let delete = with_actor(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/items/{sand}")),
    )
    .body(Body::empty())
    .unwrap();
    let (status, item) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["is_active"], false);

    let (status, error) = send(&app, post_json("/api/sales", checkout_body(&sand, 1, "15.500"), true)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "validation_error");

    // active listing hides it, include_inactive shows it
    let (_, active) = send(&app, get("/api/items")).await;
    assert_eq!(active.as_array().unwrap().len(), 0);
    let (_, all) = send(&app, get("/api/items?include_inactive=true")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}
