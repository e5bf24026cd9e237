//! Test doubles shared by the cart tests: mockall mocks of the ports plus
//! small stateful fakes for scenario tests of the cart manager.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::Notify;

use crate::domain::cart::guest_store::{GuestCartError, GuestCartStore};
use crate::domain::cart::model::{CartItem, CartRecord};
use crate::domain::cart::repository::CartRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::notifier::{Notification, Notifier};
use crate::domain::shared::value_objects::UserId;

mock! {
    pub CartRepo {}

    #[async_trait]
    impl CartRepository for CartRepo {
        async fn get_all(&self, user_id: &UserId) -> Result<Vec<CartRecord>, RepositoryError>;
        async fn find_by_product_id(&self, product_id: &str, user_id: &UserId) -> Result<Option<CartRecord>, RepositoryError>;
        async fn insert(&self, record: &CartRecord) -> Result<(), RepositoryError>;
        async fn update_quantity(&self, product_id: &str, user_id: &UserId, quantity: u32) -> Result<(), RepositoryError>;
        async fn delete(&self, product_id: &str, user_id: &UserId) -> Result<(), RepositoryError>;
        async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn test_user_id() -> UserId {
    UserId::new("test-user-id")
}

pub fn cart_item(id: &str, price: &str, quantity: u32) -> CartItem {
    CartItem::new(id, format!("Product {id}"), price, format!("/img/{id}.jpg"), quantity, "Box")
        .unwrap()
}

pub fn cart_record(user_id: &UserId, id: &str, price: &str, quantity: u32) -> CartRecord {
    CartRecord::new(user_id.clone(), cart_item(id, price, quantity))
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct InMemoryGuestStore {
    slot: Mutex<Option<Vec<CartItem>>>,
    corrupt: AtomicBool,
    saves: AtomicUsize,
    gate: Mutex<Option<Arc<LoadGate>>>,
}

impl InMemoryGuestStore {
    pub fn with_items(items: Vec<CartItem>) -> Self {
        Self {
            slot: Mutex::new(Some(items)),
            ..Self::default()
        }
    }

    pub fn corrupt() -> Self {
        let store = Self::default();
        store.corrupt.store(true, Ordering::SeqCst);
        store
    }

    pub fn slot(&self) -> Option<Vec<CartItem>> {
        self.slot.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Holds only the next `load` at the gate; later loads pass straight through.
    pub fn gate_next_load(&self, gate: Arc<LoadGate>) {
        *self.gate.lock().unwrap() = Some(gate);
    }
}

#[async_trait]
impl GuestCartStore for InMemoryGuestStore {
    async fn load(&self) -> Result<Option<Vec<CartItem>>, GuestCartError> {
        let result = if self.corrupt.load(Ordering::SeqCst) {
            Err(GuestCartError::Corrupt)
        } else {
            Ok(self.slot.lock().unwrap().clone())
        };
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        result
    }

    async fn save(&self, items: &[CartItem]) -> Result<(), GuestCartError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.corrupt.store(false, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(items.to_vec());
        Ok(())
    }
}

/// Holds a load after it has read its data until released, to order
/// concurrent loads.
pub struct LoadGate {
    pub entered: Notify,
    pub release: Notify,
}

impl LoadGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Remote cart table kept in memory, recording every call by name.
#[derive(Default)]
pub struct InMemoryCartRepository {
    rows: Mutex<Vec<CartRecord>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    gate: Mutex<Option<(UserId, Arc<LoadGate>)>>,
}

impl InMemoryCartRepository {
    pub fn with_rows(rows: Vec<CartRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Holds the next `get_all` for `user_id` at the gate.
    pub fn gate(&self, user_id: UserId, gate: Arc<LoadGate>) {
        *self.gate.lock().unwrap() = Some((user_id, gate));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rows_for(&self, user_id: &UserId) -> Vec<CartRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect()
    }

    fn record(&self, operation: &'static str) -> Result<(), RepositoryError> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.failing.lock().unwrap().contains(operation) {
            return Err(RepositoryError::Unreachable);
        }
        Ok(())
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CartRecord>, RepositoryError> {
        let result = self.record("get_all").map(|()| self.rows_for(user_id));
        let gate = {
            let mut slot = self.gate.lock().unwrap();
            let gated = slot.as_ref().is_some_and(|(gated, _)| gated == user_id);
            if gated {
                slot.take().map(|(_, gate)| gate)
            } else {
                None
            }
        };
        if let Some(gate) = gate {
            gate.pass().await;
        }
        result
    }

    async fn find_by_product_id(
        &self,
        product_id: &str,
        user_id: &UserId,
    ) -> Result<Option<CartRecord>, RepositoryError> {
        self.record("find_by_product_id")?;
        Ok(self
            .rows_for(user_id)
            .into_iter()
            .find(|row| row.product_id() == product_id))
    }

    async fn insert(&self, record: &CartRecord) -> Result<(), RepositoryError> {
        self.record("insert")?;
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn update_quantity(
        &self,
        product_id: &str,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        self.record("update_quantity")?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows
            .iter_mut()
            .find(|row| &row.user_id == user_id && row.product_id() == product_id)
        {
            row.item.quantity = quantity;
        }
        Ok(())
    }

    async fn delete(&self, product_id: &str, user_id: &UserId) -> Result<(), RepositoryError> {
        self.record("delete")?;
        self.rows
            .lock()
            .unwrap()
            .retain(|row| !(&row.user_id == user_id && row.product_id() == product_id));
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        self.record("delete_all")?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| &row.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}
