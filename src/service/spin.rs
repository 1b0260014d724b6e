use crate::db::WheelStorage;
use crate::error::WheelError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Picks the wheel result: a pending locked result first, otherwise a uniform
/// choice over the registry.
#[derive(Clone)]
pub struct SpinEngine {
    storage: WheelStorage,
    rng: Arc<Mutex<StdRng>>,
}

impl SpinEngine {
    pub fn new(storage: WheelStorage) -> Self {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    pub fn with_rng(storage: WheelStorage, rng: StdRng) -> Self {
        Self {
            storage,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub async fn spin(&self) -> Result<Option<String>, WheelError> {
        if let Some(locked) = self.storage.take_locked_result().await? {
            info!(result = %locked, "spin consumed locked result");
            return Ok(Some(locked));
        }

        let names = self.storage.list_names().await?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let result = names.choose(&mut *rng).cloned();
        debug!(candidates = names.len(), result = ?result, "random spin");
        Ok(result)
    }
}
