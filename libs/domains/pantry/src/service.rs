use std::sync::Arc;

use crate::error::{PantryError, PantryResult};
use crate::models::{CreatePantryItem, ItemFilter, PantryItem, UpdatePantryItem};
use crate::repository::PantryRepository;

/// Service layer for pantry items
#[derive(Clone)]
pub struct PantryService<R: PantryRepository> {
    repository: Arc<R>,
}

impl<R: PantryRepository> PantryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a batch of items; the whole batch is rejected on any duplicate name
    pub async fn create_items(&self, batch: Vec<CreatePantryItem>) -> PantryResult<Vec<PantryItem>> {
        self.repository.create(batch).await
    }

    /// Create a single item
    pub async fn create_item(&self, input: CreatePantryItem) -> PantryResult<PantryItem> {
        self.repository
            .create(vec![input])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PantryError::Internal("create returned no item".to_string()))
    }

    pub async fn list_items(&self, filter: ItemFilter) -> PantryResult<Vec<PantryItem>> {
        self.repository.list(filter).await
    }

    pub async fn get_item(&self, id: i64) -> PantryResult<PantryItem> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(PantryError::NotFound(id))
    }

    /// Replace an item. The stored ID is kept and derived flags recomputed.
    pub async fn update_item(&self, id: i64, input: UpdatePantryItem) -> PantryResult<PantryItem> {
        self.repository.update(id, input).await
    }

    pub async fn delete_item(&self, id: i64) -> PantryResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(PantryError::NotFound(id));
        }

        Ok(())
    }

    /// Clear the pantry, returning the now-empty collection
    pub async fn delete_all_items(&self) -> PantryResult<Vec<PantryItem>> {
        self.repository.delete_all().await
    }
}
