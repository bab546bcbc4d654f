//! # Route Modules
//!
//! One module per resource, assembled into the app router here.
//!
//! ```text
//! GET  /health
//!
//! GET  /api/items                 list catalog (active by default)
//! POST /api/items                 create item                     [actor]
//! GET  /api/items/:id
//! PATCH /api/items/:id/price      change price                    [actor]
//! DELETE /api/items/:id           soft delete                     [actor]
//!
//! POST /api/sales                 checkout → 201                  [actor]
//! GET  /api/sales?date=
//! GET  /api/sales/:number         lookup by SALE-YYYY-NNNNNN
//! POST /api/sales/:id/cancel                                      [actor]
//!
//! POST /api/refunds               full refund → 201               [actor]
//! GET  /api/refunds
//! GET  /api/refunds/:number
//!
//! GET  /api/reports/daily?date=
//! GET  /api/reports/sales-csv?date=
//!
//! GET  /api/audit-logs?limit=&action=
//! ```

pub mod audit;
pub mod health;
pub mod items;
pub mod refunds;
pub mod reports;
pub mod sales;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the full application router over the shared state.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/items", get(items::list).post(items::create))
        .route("/items/:id", get(items::get).delete(items::deactivate))
        .route("/items/:id/price", patch(items::update_price))
        .route("/sales", post(sales::create).get(sales::list))
        .route("/sales/:number", get(sales::get_by_number))
        .route("/sales/:id/cancel", post(sales::cancel))
        .route("/refunds", post(refunds::create).get(refunds::list))
        .route("/refunds/:number", get(refunds::get_by_number))
        .route("/reports/daily", get(reports::daily))
        .route("/reports/sales-csv", get(reports::sales_csv))
        .route("/audit-logs", get(audit::list));

    // the web front end runs on a different origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
