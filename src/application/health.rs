use crate::application::SharedStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub index_size: usize,
    pub chunks_stored: usize,
}

pub struct HealthUseCase {
    store: SharedStore,
}

impl HealthUseCase {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Health {
        let store = self.store.read().await;
        Health {
            status: "ok",
            index_size: store.index_size(),
            chunks_stored: store.chunks_stored(),
        }
    }
}
