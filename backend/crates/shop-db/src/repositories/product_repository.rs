use crate::Result as DbErrorResult;
use crate::repositories::{now, timestamp};

use shop_core::{NewProduct, Product};

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, description, price_cents, created_at, updated_at
    FROM products
"#;

pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_product: &NewProduct) -> DbErrorResult<Product> {
        let (created_at, ts) = now();

        let result = sqlx::query(
            r#"
                INSERT INTO products (name, description, price_cents, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_product.name)
        .bind(new_product.description.as_deref())
        .bind(new_product.price_cents)
        .bind(ts)
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: new_product.name.clone(),
            description: new_product.description.clone(),
            price_cents: new_product.price_cents,
            created_at,
            updated_at: created_at,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Product>> {
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Product>> {
        let rows = sqlx::query(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: &SqliteRow) -> DbErrorResult<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price_cents: row.try_get("price_cents")?,
        created_at: timestamp(row.try_get("created_at")?, "products.created_at")?,
        updated_at: timestamp(row.try_get("updated_at")?, "products.updated_at")?,
    })
}
