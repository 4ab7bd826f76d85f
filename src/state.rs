use crate::store::{ExerciseStore, Snapshot};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ExerciseStore>>,
}

impl AppState {
    pub fn new(store: ExerciseStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Current list, taken without holding the lock past this call.
    pub async fn snapshot(&self) -> Snapshot {
        self.store.lock().await.snapshot()
    }
}
