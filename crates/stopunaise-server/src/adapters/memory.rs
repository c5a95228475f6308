//! In-memory OrderRepository used by tests

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use stopunaise::{DomainError, NewOrder, OrderLineRecord, OrderRecord, OrderRepository};

#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: Mutex<Vec<OrderRecord>>,
    lines: Mutex<Vec<OrderLineRecord>>,
    fail_orders: bool,
    fail_lines: bool,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every order insert
    pub fn failing_orders(mut self) -> Self {
        self.fail_orders = true;
        self
    }

    /// Reject every line insert
    pub fn failing_lines(mut self) -> Self {
        self.fail_lines = true;
        self
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    pub fn lines_for(&self, order_id: Uuid) -> Vec<OrderLineRecord> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderRecord, DomainError> {
        if self.fail_orders {
            return Err(DomainError::Repository("orders: connection refused".to_string()));
        }
        let record = OrderRecord::new(order);
        self.orders.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_lines(&self, lines: &[OrderLineRecord]) -> Result<(), DomainError> {
        if self.fail_lines {
            return Err(DomainError::Repository("order_items: connection refused".to_string()));
        }
        self.lines.lock().unwrap().extend_from_slice(lines);
        Ok(())
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        self.lines.lock().unwrap().retain(|l| l.order_id != id);
        Ok(orders.len() < before)
    }
}
