//! Order Repository Port
//!
//! Abstract interface for the remote order store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, NewOrder, NewOrderLine, OrderLineRecord, OrderRecord};

/// Repository interface for orders and their line records
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order header and return the stored record
    async fn create_order(&self, order: &NewOrder) -> Result<OrderRecord, DomainError>;

    /// Bulk insert line records for an existing order
    async fn insert_lines(&self, lines: &[OrderLineRecord]) -> Result<(), DomainError>;

    /// Delete an order by ID
    async fn delete_order(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Persist an order and its lines as one unit
    ///
    /// The default implementation issues the two writes in sequence. When
    /// the line insert fails it deletes the order it just created, so no
    /// header is left without lines, and returns the insert error.
    /// Stores with transactions should override this.
    async fn place_order(
        &self,
        order: &NewOrder,
        lines: &[NewOrderLine],
    ) -> Result<OrderRecord, DomainError> {
        let record = self.create_order(order).await?;

        let rows: Vec<OrderLineRecord> = lines.iter().map(|l| l.for_order(record.id)).collect();
        if let Err(e) = self.insert_lines(&rows).await {
            tracing::warn!(order_id = %record.id, error = %e, "Line insert failed, removing order");
            if let Err(cleanup) = self.delete_order(record.id).await {
                tracing::error!(
                    order_id = %record.id,
                    error = %cleanup,
                    "Failed to remove order after line insert failure"
                );
            }
            return Err(e);
        }

        Ok(record)
    }
}
