use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;
use tracing::{debug, info};

use super::{expiration_date, Store};
use crate::domain::{format_expiration, Product};
use crate::error::StoreError;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT    NOT NULL,
        quantity     INTEGER NOT NULL,
        code_value   TEXT    NOT NULL,
        is_published BOOLEAN NOT NULL,
        expiration   DATE    NOT NULL,
        price        REAL    NOT NULL
    )
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, quantity, code_value, is_published, expiration, price FROM products";

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    quantity: i64,
    code_value: String,
    is_published: bool,
    expiration: NaiveDate,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            code_value: row.code_value,
            is_published: row.is_published,
            expiration: format_expiration(row.expiration),
            price: row.price,
        }
    }
}

/// Keeps the catalog in a SQLite `products` table, one statement per call.
///
/// No explicit transactions are used; concurrency is whatever SQLite gives a
/// single statement.
#[derive(Clone)]
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `products` table when it does not exist.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("products table ready");
        Ok(())
    }

    async fn write(&self, product: &Product) -> Result<(), StoreError> {
        let expiration = expiration_date(product)?;
        let result = sqlx::query(
            "UPDATE products SET name = ?, quantity = ?, code_value = ?, is_published = ?, \
             expiration = ?, price = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(&product.code_value)
        .bind(product.is_published)
        .bind(expiration)
        .bind(product.price)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(product.id));
        }
        debug!(product_id = product.id, "Product row written");
        Ok(())
    }
}

#[async_trait]
impl Store for SqlStore {
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_one(&self, id: i64) -> Result<Product, StoreError> {
        sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Product::from)
            .ok_or(StoreError::NotFound(id))
    }

    async fn add_one(&self, mut product: Product) -> Result<Product, StoreError> {
        let expiration = expiration_date(&product)?;
        let result = sqlx::query(
            "INSERT INTO products (name, quantity, code_value, is_published, expiration, price) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(&product.code_value)
        .bind(product.is_published)
        .bind(expiration)
        .bind(product.price)
        .execute(&self.pool)
        .await?;

        product.id = result.last_insert_rowid();
        Ok(product)
    }

    async fn update_one(&self, product: Product) -> Result<Product, StoreError> {
        let mut stored = self.get_one(product.id).await?;
        stored.merge(&product);
        self.write(&stored).await?;
        Ok(stored)
    }

    async fn replace_one(&self, product: Product) -> Result<Product, StoreError> {
        self.write(&product).await?;
        Ok(product)
    }

    async fn delete_one(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
