//! # Sale Repository
//!
//! The sale ledger: creation, lookup, date-scoped listing and cancellation.
//!
//! ## Sale Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create_sale() Flow                                │
//! │                                                                         │
//! │  1. VALIDATE                                                           │
//! │     └── non-empty cart, quantities, payment method + reference         │
//! │                                                                         │
//! │  2. RESOLVE CATALOG                                                    │
//! │     └── every line's item must exist and be active                     │
//! │                                                                         │
//! │  3. RECOMPUTE TOTALS                                                   │
//! │     └── compute_totals() over catalog prices; client-submitted line    │
//! │         totals, subtotal, discount and total must match exactly,       │
//! │         else TotalsMismatch. The server never trusts client math.      │
//! │                                                                         │
//! │  4. ONE TRANSACTION                                                    │
//! │     ├── allocate SALE-YYYY-NNNNNN from number_sequences                │
//! │     ├── insert sale header                                             │
//! │     └── insert all lines                                               │
//! │     (bounded retry if the number collides with a racing writer)        │
//! │                                                                         │
//! │  5. POST-COMMIT                                                        │
//! │     └── CREATE_SALE audit entry, best effort                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use kwpos_core::calendar::{business_year, day_bounds_utc};
use kwpos_core::cart::{compute_totals, Discount};
use kwpos_core::numbering::{format_number, NumberKind};
use kwpos_core::validation::{validate_payment, validate_quantity, validate_reason};
use kwpos_core::{
    AuditAction, Cashier, Item, Money, PaymentMethod, Sale, SaleLine, SaleStatus, ValidationError,
};

use crate::error::{DbError, DbResult};
use crate::repository::audit::AuditRepository;
use crate::repository::sequence;

/// How many times number allocation is retried on a collision before the
/// error is surfaced.
const NUMBER_RETRY_LIMIT: u32 = 3;

// =============================================================================
// Request Types
// =============================================================================

/// One submitted cart line. The client sends its own `line_total_fils` so the
/// server can prove both sides computed the same figure.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleLineInput {
    pub item_id: String,
    pub quantity: i64,
    pub line_total_fils: i64,
}

/// A complete checkout submission.
///
/// `subtotal_fils` / `discount_fils` / `total_fils` are what the client's
/// preview showed the cashier; the repository recomputes all three from the
/// catalog and the discount input and rejects any disagreement.
#[derive(Debug, Clone)]
pub struct CreateSaleRequest {
    pub lines: Vec<SaleLineInput>,
    pub discount: Option<Discount>,
    pub subtotal_fils: i64,
    pub discount_fils: i64,
    pub total_fils: i64,
    pub payment_method: PaymentMethod,
    pub knet_reference: Option<String>,
    pub cheque_number: Option<String>,
    pub notes: Option<String>,
}

/// A persisted sale with its lines.
#[derive(Debug, Clone)]
pub struct SaleWithLines {
    pub sale: Sale,
    pub lines: Vec<SaleLine>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    fn audit(&self) -> AuditRepository {
        AuditRepository::new(self.pool.clone())
    }

    /// Creates a completed sale from a checkout submission.
    ///
    /// See the module docs for the full flow. Nothing is written unless the
    /// whole submission is valid; header and lines commit together.
    pub async fn create_sale(
        &self,
        request: CreateSaleRequest,
        cashier: &Cashier,
    ) -> DbResult<SaleWithLines> {
        if request.lines.is_empty() {
            return Err(ValidationError::Required {
                field: "lines".to_string(),
            }
            .into());
        }
        for line in &request.lines {
            validate_quantity(line.quantity)?;
        }
        validate_payment(
            request.payment_method,
            request.knet_reference.as_deref(),
            request.cheque_number.as_deref(),
        )?;

        // Resolve every line against the catalog; prices come from here,
        // never from the client.
        let mut resolved: Vec<(Item, i64)> = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let item = self.get_item(&line.item_id).await?.ok_or_else(|| {
                ValidationError::InvalidFormat {
                    field: "item_id".to_string(),
                    reason: format!("unknown item {}", line.item_id),
                }
            })?;
            if !item.is_active {
                return Err(ValidationError::InvalidFormat {
                    field: "item_id".to_string(),
                    reason: format!("item {} is inactive", line.item_id),
                }
                .into());
            }
            resolved.push((item, line.quantity));
        }

        // Server-side recomputation; any disagreement is an integrity error.
        for (input, (item, qty)) in request.lines.iter().zip(&resolved) {
            let computed = item.price().multiply_quantity(*qty);
            if input.line_total_fils != computed.fils() {
                return Err(DbError::TotalsMismatch {
                    field: format!("line_total[{}]", item.name_en),
                    submitted: Money::from_fils(input.line_total_fils).to_decimal_string(),
                    computed: computed.to_decimal_string(),
                });
            }
        }

        let totals = compute_totals(
            resolved.iter().map(|(item, qty)| (*qty, item.price())),
            request.discount,
        );
        verify_total("subtotal", request.subtotal_fils, totals.subtotal)?;
        verify_total("discount", request.discount_fils, totals.discount)?;
        verify_total("total", request.total_fils, totals.total)?;

        let now = Utc::now();
        let year = business_year(now);

        let mut attempt = 0;
        let sale = loop {
            attempt += 1;
            match self
                .insert_sale_txn(&request, &resolved, cashier, now, year, &totals)
                .await
            {
                Ok(sale) => break sale,
                Err(e) if e.is_unique_violation_on("sale_number") && attempt < NUMBER_RETRY_LIMIT => {
                    debug!(attempt, "Sale number collision, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            sale_number = %sale.sale.sale_number,
            total = %sale.sale.total(),
            cashier = %cashier.name,
            "Sale created"
        );
        self.audit()
            .append_best_effort(
                &cashier.name,
                AuditAction::CreateSale,
                &format!(
                    "Sale {} created for {}",
                    sale.sale.sale_number,
                    sale.sale.total()
                ),
            )
            .await;

        Ok(sale)
    }

    /// The transactional part of `create_sale`: number allocation, header
    /// insert and line inserts commit or roll back together.
    async fn insert_sale_txn(
        &self,
        request: &CreateSaleRequest,
        resolved: &[(Item, i64)],
        cashier: &Cashier,
        now: chrono::DateTime<Utc>,
        year: i32,
        totals: &kwpos_core::cart::CartTotals,
    ) -> DbResult<SaleWithLines> {
        let mut tx = self.pool.begin().await?;

        let seq = sequence::next_in_year(&mut *tx, NumberKind::Sale, year).await?;
        let sale_number = format_number(NumberKind::Sale, year, seq);

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            sale_number,
            status: SaleStatus::Completed,
            sale_date: now,
            cashier_id: cashier.id.clone(),
            cashier_name: cashier.name.clone(),
            subtotal_fils: totals.subtotal.fils(),
            discount_fils: totals.discount.fils(),
            discount_bps: totals.discount_bps as i64,
            total_fils: totals.total.fils(),
            payment_method: request.payment_method,
            knet_reference: request.knet_reference.clone(),
            cheque_number: request.cheque_number.clone(),
            notes: request.notes.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, sale_number, status, sale_date,
                cashier_id, cashier_name,
                subtotal_fils, discount_fils, discount_bps, total_fils,
                payment_method, knet_reference, cheque_number, notes
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14
            )
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.sale_number)
        .bind(sale.status)
        .bind(sale.sale_date)
        .bind(&sale.cashier_id)
        .bind(&sale.cashier_name)
        .bind(sale.subtotal_fils)
        .bind(sale.discount_fils)
        .bind(sale.discount_bps)
        .bind(sale.total_fils)
        .bind(sale.payment_method)
        .bind(&sale.knet_reference)
        .bind(&sale.cheque_number)
        .bind(&sale.notes)
        .execute(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(resolved.len());
        for (item, quantity) in resolved {
            let line = SaleLine {
                id: Uuid::new_v4().to_string(),
                sale_id: sale.id.clone(),
                item_id: item.id.clone(),
                name_en_snapshot: item.name_en.clone(),
                name_ar_snapshot: item.name_ar.clone(),
                unit_snapshot: item.unit.clone(),
                unit_price_fils: item.price_fils,
                quantity: *quantity,
                line_total_fils: item.price_fils * quantity,
            };

            sqlx::query(
                r#"
                INSERT INTO sale_lines (
                    id, sale_id, item_id,
                    name_en_snapshot, name_ar_snapshot, unit_snapshot,
                    unit_price_fils, quantity, line_total_fils
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&line.id)
            .bind(&line.sale_id)
            .bind(&line.item_id)
            .bind(&line.name_en_snapshot)
            .bind(&line.name_ar_snapshot)
            .bind(&line.unit_snapshot)
            .bind(line.unit_price_fils)
            .bind(line.quantity)
            .bind(line.line_total_fils)
            .execute(&mut *tx)
            .await?;

            lines.push(line);
        }

        tx.commit().await?;

        Ok(SaleWithLines { sale, lines })
    }

    /// Gets a sale (with lines) by internal ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SaleWithLines>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, status, sale_date,
                   cashier_id, cashier_name,
                   subtotal_fils, discount_fils, discount_bps, total_fils,
                   payment_method, knet_reference, cheque_number, notes
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.attach_lines(sale).await
    }

    /// Gets a sale (with lines) by business number, e.g. `SALE-2026-000001`.
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<SaleWithLines>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, status, sale_date,
                   cashier_id, cashier_name,
                   subtotal_fils, discount_fils, discount_bps, total_fils,
                   payment_method, knet_reference, cheque_number, notes
            FROM sales
            WHERE sale_number = ?1
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        self.attach_lines(sale).await
    }

    async fn attach_lines(&self, sale: Option<Sale>) -> DbResult<Option<SaleWithLines>> {
        match sale {
            Some(sale) => {
                let lines = self.get_lines(&sale.id).await?;
                Ok(Some(SaleWithLines { sale, lines }))
            }
            None => Ok(None),
        }
    }

    /// Gets all lines for a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, item_id,
                   name_en_snapshot, name_ar_snapshot, unit_snapshot,
                   unit_price_fils, quantity, line_total_fils
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists sales newest-first, optionally scoped to one business date
    /// (the UTC+3 calendar day, translated to a UTC range query).
    pub async fn list(&self, date: Option<NaiveDate>) -> DbResult<Vec<Sale>> {
        let sales = match date {
            Some(date) => {
                let (start, end) = day_bounds_utc(date);
                sqlx::query_as::<_, Sale>(
                    r#"
                    SELECT id, sale_number, status, sale_date,
                           cashier_id, cashier_name,
                           subtotal_fils, discount_fils, discount_bps, total_fils,
                           payment_method, knet_reference, cheque_number, notes
                    FROM sales
                    WHERE sale_date >= ?1 AND sale_date < ?2
                    ORDER BY sale_date DESC
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sale>(
                    r#"
                    SELECT id, sale_number, status, sale_date,
                           cashier_id, cashier_name,
                           subtotal_fils, discount_fils, discount_bps, total_fils,
                           payment_method, knet_reference, cheque_number, notes
                    FROM sales
                    ORDER BY sale_date DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(sales)
    }

    /// Cancels a completed sale.
    ///
    /// The guarded UPDATE only matches `status = 'completed'`; when it
    /// matches nothing, a follow-up lookup distinguishes a missing sale
    /// from one already in a terminal state.
    pub async fn cancel_sale(&self, id: &str, reason: &str, cashier: &Cashier) -> DbResult<Sale> {
        validate_reason(reason)?;

        let result = sqlx::query(
            r#"
            UPDATE sales SET status = 'cancelled'
            WHERE id = ?1 AND status = 'completed'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.get_by_id(id).await? {
                None => Err(DbError::not_found("Sale", id)),
                Some(found) => Err(DbError::invalid_state(
                    "Sale",
                    id,
                    format!("{:?}", found.sale.status).to_lowercase(),
                )),
            };
        }

        let cancelled = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        info!(sale_number = %cancelled.sale.sale_number, cashier = %cashier.name, "Sale cancelled");
        self.audit()
            .append_best_effort(
                &cashier.name,
                AuditAction::CancelSale,
                &format!(
                    "Sale {} cancelled: {}",
                    cancelled.sale.sale_number,
                    reason.trim()
                ),
            )
            .await;

        Ok(cancelled.sale)
    }

    async fn get_item(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name_en, name_ar, unit, price_fils, is_active, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }
}

fn verify_total(field: &str, submitted_fils: i64, computed: Money) -> DbResult<()> {
    if submitted_fils != computed.fils() {
        return Err(DbError::TotalsMismatch {
            field: field.to_string(),
            submitted: Money::from_fils(submitted_fils).to_decimal_string(),
            computed: computed.to_decimal_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::item::NewItem;

    fn cashier() -> Cashier {
        Cashier {
            id: "u1".to_string(),
            name: "Cashier One".to_string(),
            role: "cashier".to_string(),
        }
    }

    async fn seeded_db() -> (Database, Item) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sand = db
            .items()
            .create(
                NewItem {
                    name_en: "Washed Sand".to_string(),
                    name_ar: "رمل مغسول".to_string(),
                    unit: "cbm".to_string(),
                    price_fils: 15_500,
                },
                &cashier(),
            )
            .await
            .unwrap();
        (db, sand)
    }

    fn cash_request(item: &Item, qty: i64) -> CreateSaleRequest {
        let line_total = item.price_fils * qty;
        CreateSaleRequest {
            lines: vec![SaleLineInput {
                item_id: item.id.clone(),
                quantity: qty,
                line_total_fils: line_total,
            }],
            discount: None,
            subtotal_fils: line_total,
            discount_fils: 0,
            total_fils: line_total,
            payment_method: PaymentMethod::Cash,
            knet_reference: None,
            cheque_number: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_sale_persists_header_and_lines() {
        let (db, sand) = seeded_db().await;

        let created = db
            .sales()
            .create_sale(cash_request(&sand, 2), &cashier())
            .await
            .unwrap();

        assert_eq!(created.sale.sale_number, format!("SALE-{}-000001", business_year(Utc::now())));
        assert_eq!(created.sale.status, SaleStatus::Completed);
        assert_eq!(created.sale.total_fils, 31_000);
        assert_eq!(created.lines.len(), 1);
        assert_eq!(created.lines[0].name_en_snapshot, "Washed Sand");

        let fetched = db
            .sales()
            .get_by_number(&created.sale.sale_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.sale.id, created.sale.id);
        assert_eq!(fetched.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_percent_discount_recomputed_server_side() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 2);
        request.discount = Some(Discount::Percent(1_000));
        request.discount_fils = 3_100;
        request.total_fils = 27_900;

        let created = db.sales().create_sale(request, &cashier()).await.unwrap();
        assert_eq!(created.sale.subtotal_fils, 31_000);
        assert_eq!(created.sale.discount_fils, 3_100);
        assert_eq!(created.sale.total_fils, 27_900);
        assert_eq!(created.sale.discount_bps, 1_000);
    }

    #[tokio::test]
    async fn test_knet_without_reference_writes_nothing() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 1);
        request.payment_method = PaymentMethod::Knet;

        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // no row and no number was consumed
        assert!(db.sales().list(None).await.unwrap().is_empty());
        let next = db
            .sales()
            .create_sale(cash_request(&sand, 1), &cashier())
            .await
            .unwrap();
        assert!(next.sale.sale_number.ends_with("-000001"));
    }

    #[tokio::test]
    async fn test_credit_is_rejected() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 1);
        request.payment_method = PaymentMethod::Credit;

        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_totals_mismatch_rejected() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 2);
        request.total_fils -= 1_000; // client lowballs the total

        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::TotalsMismatch { .. }));
        assert!(db.sales().list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_line_total_mismatch_rejected() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 2);
        request.lines[0].line_total_fils += 1;

        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::TotalsMismatch { .. }));
    }

    #[tokio::test]
    async fn test_unknown_and_inactive_items_rejected() {
        let (db, sand) = seeded_db().await;

        let mut request = cash_request(&sand, 1);
        request.lines[0].item_id = "missing".to_string();
        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        db.items().deactivate(&sand.id, &cashier()).await.unwrap();
        let err = db
            .sales()
            .create_sale(cash_request(&sand, 1), &cashier())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let (db, _) = seeded_db().await;

        let request = CreateSaleRequest {
            lines: vec![],
            discount: None,
            subtotal_fils: 0,
            discount_fils: 0,
            total_fils: 0,
            payment_method: PaymentMethod::Cash,
            knet_reference: None,
            cheque_number: None,
            notes: None,
        };
        let err = db.sales().create_sale(request, &cashier()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_numbers_are_sequential() {
        let (db, sand) = seeded_db().await;

        let first = db
            .sales()
            .create_sale(cash_request(&sand, 1), &cashier())
            .await
            .unwrap();
        let second = db
            .sales()
            .create_sale(cash_request(&sand, 1), &cashier())
            .await
            .unwrap();

        assert!(first.sale.sale_number.ends_with("-000001"));
        assert!(second.sale.sale_number.ends_with("-000002"));
    }

    #[tokio::test]
    async fn test_concurrent_sales_get_distinct_numbers() {
        // File-backed pool so tasks really run on separate connections
        let path = std::env::temp_dir().join(format!("kwpos-test-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let sand = db
            .items()
            .create(
                crate::repository::item::NewItem {
                    name_en: "Washed Sand".to_string(),
                    name_ar: "رمل مغسول".to_string(),
                    unit: "cbm".to_string(),
                    price_fils: 15_500,
                },
                &cashier(),
            )
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let sales = db.sales();
            let request = cash_request(&sand, 1);
            handles.push(tokio::spawn(async move {
                sales.create_sale(request, &cashier()).await
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            let created = handle.await.unwrap().unwrap();
            numbers.push(created.sale.sale_number);
        }

        let unique: std::collections::HashSet<_> = numbers.iter().collect();
        assert_eq!(unique.len(), 8);
        numbers.sort();
        assert!(numbers[0].ends_with("-000001"));
        assert!(numbers[7].ends_with("-000008"));

        db.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_cancel_sale_guards() {
        let (db, sand) = seeded_db().await;

        let sale = db
            .sales()
            .create_sale(cash_request(&sand, 1), &cashier())
            .await
            .unwrap();

        let cancelled = db
            .sales()
            .cancel_sale(&sale.sale.id, "wrong delivery", &cashier())
            .await
            .unwrap();
        assert_eq!(cancelled.status, SaleStatus::Cancelled);

        // second cancel hits the terminal state
        let err = db
            .sales()
            .cancel_sale(&sale.sale.id, "again", &cashier())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));

        // unknown id is NotFound, not InvalidState
        let err = db
            .sales()
            .cancel_sale("missing", "whatever", &cashier())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // blank reason rejected before any write
        let err = db
            .sales()
            .cancel_sale(&sale.sale.id, "  ", &cashier())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_sale_writes_audit() {
        let (db, sand) = seeded_db().await;

        db.sales()
            .create_sale(cash_request(&sand, 2), &cashier())
            .await
            .unwrap();

        let log = db
            .audit()
            .list(None, Some(AuditAction::CreateSale))
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert!(log[0].details.contains("SALE-"));
        assert!(log[0].details.contains("31.000"));
        assert_eq!(log[0].actor_name, "Cashier One");
    }
}
