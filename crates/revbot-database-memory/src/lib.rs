//! In-memory database.

mod state;
mod transaction;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use revbot_database_interface::{DbService, DbTransaction, Result};
use revbot_models::PullRequestStatusEntry;
use tokio::sync::Mutex as AsyncMutex;

use crate::state::MemoryState;
pub use crate::transaction::MemoryTransaction;

/// In-memory database.
///
/// Transactions hold an exclusive lock on the whole state, which makes them serializable.
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct MemoryDb {
    state: Arc<AsyncMutex<MemoryState>>,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds the reviewer sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Arc::new(AsyncMutex::new(MemoryState::default())),
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// Replaces the pull request status catalog.
    pub fn with_status_catalog(mut self, statuses: Vec<PullRequestStatusEntry>) -> Self {
        self.state = Arc::new(AsyncMutex::new(MemoryState {
            statuses,
            ..Default::default()
        }));
        self
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn begin(&self) -> Result<Box<dyn DbTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(MemoryTransaction::new(guard, self.rng.clone())))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
