//! PostgreSQL implementation of OrderRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use stopunaise::{
    DomainError, NewOrder, NewOrderLine, OrderLineRecord, OrderRecord, OrderRepository,
};

/// PostgreSQL implementation of OrderRepository
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    full_name: String,
    phone: String,
    municipality: String,
    total: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            municipality: row.municipality,
            total: u64::try_from(row.total)
                .map_err(|_| DomainError::Repository(format!("negative total: {}", row.total)))?,
            created_at: row.created_at,
        })
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

fn to_bigint(value: u64) -> Result<i64, DomainError> {
    i64::try_from(value).map_err(|_| DomainError::Repository(format!("amount out of range: {value}")))
}

fn to_int(quantity: u32) -> Result<i32, DomainError> {
    i32::try_from(quantity)
        .map_err(|_| DomainError::Repository(format!("quantity out of range: {quantity}")))
}

async fn insert_order(conn: &mut PgConnection, order: &NewOrder) -> Result<OrderRecord, DomainError> {
    let row = sqlx::query_as::<_, OrderRow>(
        r#"
        INSERT INTO orders (full_name, phone, municipality, total)
        VALUES ($1, $2, $3, $4)
        RETURNING id, full_name, phone, municipality, total, created_at
        "#,
    )
    .bind(&order.full_name)
    .bind(&order.phone)
    .bind(&order.municipality)
    .bind(to_bigint(order.total)?)
    .fetch_one(conn)
    .await
    .map_err(db_error)?;

    row.try_into()
}

async fn insert_line_rows(
    conn: &mut PgConnection,
    lines: &[OrderLineRecord],
) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Ok(());
    }

    let columns = lines
        .iter()
        .map(|l| Ok((to_int(l.quantity)?, to_bigint(l.unit_price)?)))
        .collect::<Result<Vec<_>, DomainError>>()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO order_items (order_id, product_name, quantity, price) ");
    builder.push_values(lines.iter().zip(columns), |mut b, (line, (quantity, price))| {
        b.push_bind(line.order_id)
            .push_bind(&line.product_name)
            .push_bind(quantity)
            .push_bind(price);
    });

    builder.build().execute(conn).await.map_err(db_error)?;
    Ok(())
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderRecord, DomainError> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        insert_order(&mut conn, order).await
    }

    async fn insert_lines(&self, lines: &[OrderLineRecord]) -> Result<(), DomainError> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        insert_line_rows(&mut conn, lines).await
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Both inserts share one transaction; a failure rolls the order back.
    async fn place_order(
        &self,
        order: &NewOrder,
        lines: &[NewOrderLine],
    ) -> Result<OrderRecord, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let record = insert_order(&mut tx, order).await?;
        let rows: Vec<OrderLineRecord> = lines.iter().map(|l| l.for_order(record.id)).collect();
        insert_line_rows(&mut tx, &rows).await?;

        tx.commit().await.map_err(db_error)?;
        tracing::debug!(order_id = %record.id, lines = rows.len(), "Order committed");
        Ok(record)
    }
}
