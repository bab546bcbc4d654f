//! # Item Repository
//!
//! Catalog operations for the bulk materials the yard sells.
//!
//! ## Soft Delete
//! Historical sale lines reference items by ID, so items are never removed;
//! deactivation (`is_active = 0`) hides them from the selling screen while
//! keeping history intact. Price changes don't touch history either, because
//! sale lines snapshot the price at sale time.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use kwpos_core::validation::{validate_item_name, validate_price_fils};
use kwpos_core::{AuditAction, Cashier, Item, Money};

use crate::error::{DbError, DbResult};
use crate::repository::audit::AuditRepository;

/// Input for creating a catalog item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name_en: String,
    pub name_ar: String,
    pub unit: String,
    pub price_fils: i64,
}

/// Repository for catalog item operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    fn audit(&self) -> AuditRepository {
        AuditRepository::new(self.pool.clone())
    }

    /// Creates a catalog item and audits the creation.
    pub async fn create(&self, new: NewItem, cashier: &Cashier) -> DbResult<Item> {
        validate_item_name("name_en", &new.name_en)?;
        validate_item_name("name_ar", &new.name_ar)?;
        validate_item_name("unit", &new.unit)?;
        validate_price_fils(new.price_fils)?;

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name_en: new.name_en.trim().to_string(),
            name_ar: new.name_ar.trim().to_string(),
            unit: new.unit.trim().to_string(),
            price_fils: new.price_fils,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, name = %item.name_en, "Creating item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name_en, name_ar, unit, price_fils, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name_en)
        .bind(&item.name_ar)
        .bind(&item.unit)
        .bind(item.price_fils)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        info!(id = %item.id, name = %item.name_en, "Item created");
        self.audit()
            .append_best_effort(
                &cashier.name,
                AuditAction::CreateItem,
                &format!("Item '{}' created at {}", item.name_en, item.price()),
            )
            .await;

        Ok(item)
    }

    /// Gets an item by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Item>> {
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

    /// Lists items ordered by English name.
    ///
    /// `active_only` hides deactivated items (the selling screen); passing
    /// false returns everything (the admin screen).
    pub async fn list(&self, active_only: bool) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name_en, name_ar, unit, price_fils, is_active, created_at, updated_at
            FROM items
            WHERE (?1 = 0 OR is_active = 1)
            ORDER BY name_en
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates an item's unit price and audits old/new values.
    pub async fn update_price(
        &self,
        id: &str,
        price_fils: i64,
        cashier: &Cashier,
    ) -> DbResult<Item> {
        validate_price_fils(price_fils)?;

        let before = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))?;

        sqlx::query(
            r#"
            UPDATE items SET price_fils = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_fils)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!(id = %id, price_fils, "Item price updated");
        self.audit()
            .append_best_effort(
                &cashier.name,
                AuditAction::UpdatePrice,
                &format!(
                    "Item '{}' price {} -> {}",
                    before.name_en,
                    before.price(),
                    Money::from_fils(price_fils)
                ),
            )
            .await;

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Soft-deletes an item (hides it from the selling screen).
    /// Deactivating an already-inactive item is a no-op.
    pub async fn deactivate(&self, id: &str, cashier: &Cashier) -> DbResult<Item> {
        let item = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))?;

        if item.is_active {
            sqlx::query(
                r#"
                UPDATE items SET is_active = 0, updated_at = ?2
                WHERE id = ?1
                "#,
            )
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

            info!(id = %id, name = %item.name_en, "Item deactivated");
            self.audit()
                .append_best_effort(
                    &cashier.name,
                    AuditAction::DeactivateItem,
                    &format!("Item '{}' deactivated", item.name_en),
                )
                .await;
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
