use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{
    InvoiceAddress, InvoiceCreditCardNumber, InvoiceEmailAddress, Money, Order, OrderItem,
    OrderNumber, ValidationErrors,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    Result, StoreError,
    store::{OrderRepository, stamp_created_at},
};

const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_number_key";

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    invoice_address: String,
    invoice_email_address: String,
    invoice_credit_card_number: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: String,
    product_name: String,
    product_amount: i32,
    product_price_cents: i64,
}

impl PostgresOrderRepository {
    /// Creates a new PostgreSQL order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn items_for(&self, order_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<OrderItemRow>>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_id, product_id, product_name, product_amount, product_price_cents
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, position ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<OrderItemRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }
        Ok(grouped)
    }

    async fn load_one(&self, row: Option<OrderRow>) -> Result<Option<Order>> {
        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = self.items_for(&[row.id]).await?;
        let item_rows = items.remove(&row.id).unwrap_or_default();
        restore(row, item_rows).map(Some)
    }
}

/// Rebuilds an aggregate from rows, re-running every domain check.
fn restore(row: OrderRow, item_rows: Vec<OrderItemRow>) -> Result<Order> {
    let corrupt = |reason: String| StoreError::CorruptRecord(format!("order {}: {reason}", row.id));

    let items = item_rows
        .iter()
        .map(|item| {
            OrderItem::create(
                &item.product_id,
                &item.product_name,
                item.product_amount,
                Money::from_cents(item.product_price_cents),
            )
        })
        .collect::<std::result::Result<Vec<_>, ValidationErrors>>()
        .map_err(|e| corrupt(e.to_string()))?;

    let address =
        InvoiceAddress::create(&row.invoice_address).map_err(|e| corrupt(e.to_string()))?;
    let email = InvoiceEmailAddress::create(&row.invoice_email_address)
        .map_err(|e| corrupt(e.to_string()))?;
    let card = InvoiceCreditCardNumber::create(&row.invoice_credit_card_number)
        .map_err(|e| corrupt(e.to_string()))?;

    Order::restore(
        OrderId::from_uuid(row.id),
        OrderNumber::new(row.order_number.clone()),
        row.created_at,
        address,
        email,
        card,
        items,
    )
    .map_err(|e| corrupt(e.to_string()))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip_all, fields(order_number = %order.order_number()))]
    async fn add(&self, mut order: Order) -> Result<Order> {
        let created_at = stamp_created_at(&mut order);
        let order_number = order.order_number().as_str().to_string();

        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_number, invoice_address, invoice_email_address, invoice_credit_card_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(&order_number)
        .bind(order.invoice_address().as_str())
        .bind(order.invoice_email_address().as_str())
        .bind(order.invoice_credit_card_number().as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some(ORDER_NUMBER_CONSTRAINT)
            {
                return StoreError::DuplicateOrderNumber(order_number.clone());
            }
            StoreError::Database(e)
        })?;

        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, position, product_id, product_name, product_amount, product_price_cents)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(order.id().as_uuid())
            .bind(position as i32)
            .bind(item.product_id().as_str())
            .bind(item.product_name())
            .bind(item.quantity() as i32)
            .bind(item.unit_price().cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_number, invoice_address, invoice_email_address, invoice_credit_card_number, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        self.load_one(row).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_number, invoice_address, invoice_email_address, invoice_credit_card_number, created_at
            FROM orders
            WHERE order_number = $1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        self.load_one(row).await
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_number, invoice_address, invoice_email_address, invoice_credit_card_number, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut items = self.items_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let item_rows = items.remove(&row.id).unwrap_or_default();
                restore(row, item_rows)
            })
            .collect()
    }
}
