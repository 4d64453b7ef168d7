use crate::error::AppError;
use orderstore::OrderStore;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state.
///
/// The store is the single shared mutable resource; all conflicting writes
/// serialize on its mutex. Guards are never held across an await point.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<OrderStore>>,
}

impl AppState {
    pub fn new(store: OrderStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Acquire the store. A poisoned lock means a writer panicked
    /// mid-operation; treat it as a storage failure.
    pub fn store(&self) -> Result<MutexGuard<'_, OrderStore>, AppError> {
        self.store.lock().map_err(|_| AppError::LockPoisoned)
    }
}
