//! Order repository. An order and its line items are always written together
//! in one transaction.

use crate::repositories::{now, timestamp};
use crate::{DbError, Result as DbErrorResult};

use shop_core::{NewOrderItem, Order, OrderItem, OrderStatus};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_ORDER: &str = r#"
    SELECT id, owner_id, status, total_cents, created_at, updated_at
    FROM orders
"#;

pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for `owner_id`, pricing each line at the product's
    /// current price. Fails with `DbError::NotFound` for an unknown product,
    /// `DbError::OwnerMissing` when the customer is gone and
    /// `DbError::Validation` when the total does not fit.
    pub async fn create(&self, owner_id: i64, items: &[NewOrderItem]) -> DbErrorResult<Order> {
        let mut tx = self.pool.begin().await?;

        // Tokens outlive deleted accounts
        let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;

        if owner.is_none() {
            return Err(DbError::OwnerMissing {
                owner_id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let price: Option<i64> = sqlx::query_scalar("SELECT price_cents FROM products WHERE id = ?")
                .bind(item.product_id)
                .fetch_optional(&mut *tx)
                .await?;

            let unit_price_cents = price.ok_or_else(|| DbError::NotFound {
                entity: "Product",
                id: item.product_id,
                location: ErrorLocation::from(Location::caller()),
            })?;

            priced.push(OrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents,
            });
        }

        let total_cents = Order::compute_total(&priced).map_err(|e| DbError::Validation {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let (created_at, ts) = now();
        let status = OrderStatus::default();

        let result = sqlx::query(
            r#"
                INSERT INTO orders (owner_id, status, total_cents, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(status.as_str())
        .bind(total_cents)
        .bind(ts)
        .bind(ts)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();

        for (position, item) in priced.iter().enumerate() {
            sqlx::query(
                r#"
                    INSERT INTO order_items (order_id, position, product_id, quantity, unit_price_cents)
                    VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(position as i64)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            owner_id,
            status,
            total_cents,
            items: priced,
            created_at,
            updated_at: created_at,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Order>> {
        let row = sqlx::query(&format!("{SELECT_ORDER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let items = self.find_items(id).await?;
                Ok(Some(order_from_row(&row, items)?))
            }
            None => Ok(None),
        }
    }

    /// Every order in the store, regardless of owner.
    pub async fn find_all(&self) -> DbErrorResult<Vec<Order>> {
        let rows = sqlx::query(&format!("{SELECT_ORDER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        self.with_items(&rows).await
    }

    /// Returns `None` when the order does not exist.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> DbErrorResult<Option<Order>> {
        let (_, ts) = now();

        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(ts)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Deletes the order and, by cascade, its line items.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn with_items(&self, rows: &[SqliteRow]) -> DbErrorResult<Vec<Order>> {
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let items = self.find_items(id).await?;
            orders.push(order_from_row(row, items)?);
        }

        Ok(orders)
    }

    async fn find_items(&self, order_id: i64) -> DbErrorResult<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
                SELECT product_id, quantity, unit_price_cents
                FROM order_items
                WHERE order_id = ?
                ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> DbErrorResult<OrderItem> {
                Ok(OrderItem {
                    product_id: row.try_get("product_id")?,
                    quantity: row.try_get("quantity")?,
                    unit_price_cents: row.try_get("unit_price_cents")?,
                })
            })
            .collect()
    }
}

fn order_from_row(row: &SqliteRow, items: Vec<OrderItem>) -> DbErrorResult<Order> {
    let status: String = row.try_get("status")?;

    Ok(Order {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        status: OrderStatus::from_str(&status).map_err(|e| DbError::Initialization {
            message: format!("Invalid OrderStatus in orders.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        total_cents: row.try_get("total_cents")?,
        items,
        created_at: timestamp(row.try_get("created_at")?, "orders.created_at")?,
        updated_at: timestamp(row.try_get("updated_at")?, "orders.updated_at")?,
    })
}
