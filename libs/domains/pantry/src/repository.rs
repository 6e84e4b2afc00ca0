use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PantryError, PantryResult};
use crate::models::{CreatePantryItem, ItemFilter, PantryItem, UpdatePantryItem};

/// Repository trait for pantry item storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PantryRepository: Send + Sync {
    /// Insert a batch, all or nothing. Fails with `DuplicateName` if two
    /// candidates share a name or a candidate's name is already stored.
    async fn create(&self, batch: Vec<CreatePantryItem>) -> PantryResult<Vec<PantryItem>>;

    /// Get an item by ID
    async fn get_by_id(&self, id: i64) -> PantryResult<Option<PantryItem>>;

    /// List items matching the filter, in insertion order
    async fn list(&self, filter: ItemFilter) -> PantryResult<Vec<PantryItem>>;

    /// Replace an existing item, keeping its ID
    async fn update(&self, id: i64, input: UpdatePantryItem) -> PantryResult<PantryItem>;

    /// Delete an item by ID, returns whether it existed
    async fn delete(&self, id: i64) -> PantryResult<bool>;

    /// Remove every item and return the (empty) remaining collection
    async fn delete_all(&self) -> PantryResult<Vec<PantryItem>>;
}

/// Source of "now" for expiry computation
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug)]
struct PantryState {
    items: Vec<PantryItem>,
    next_id: i64,
}

impl PantryState {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Position and value of the item with `id`
    fn locate(&self, id: i64) -> Option<(usize, &PantryItem)> {
        self.items.iter().enumerate().find(|(_, item)| item.id == id)
    }
}

/// In-memory implementation of PantryRepository.
///
/// Items and the ID counter sit behind one lock, so duplicate checks and ID
/// assignment happen atomically with the insert.
#[derive(Clone)]
pub struct InMemoryPantryRepository {
    state: Arc<RwLock<PantryState>>,
    clock: Clock,
}

impl InMemoryPantryRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: Arc::new(RwLock::new(PantryState::new())),
            clock,
        }
    }
}

impl Default for InMemoryPantryRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// First name that appears twice within the batch, else the first name already stored.
fn find_duplicate_name<'a>(batch: &'a [CreatePantryItem], stored: &[PantryItem]) -> Option<&'a str> {
    let within_batch = batch.iter().enumerate().find(|(i, candidate)| {
        batch
            .iter()
            .enumerate()
            .any(|(j, other)| *i != j && candidate.name == other.name)
    });

    if let Some((_, candidate)) = within_batch {
        return Some(&candidate.name);
    }

    batch
        .iter()
        .find(|candidate| stored.iter().any(|item| item.name == candidate.name))
        .map(|candidate| candidate.name.as_str())
}

#[async_trait]
impl PantryRepository for InMemoryPantryRepository {
    async fn create(&self, batch: Vec<CreatePantryItem>) -> PantryResult<Vec<PantryItem>> {
        let mut state = self.state.write().await;

        if let Some(name) = find_duplicate_name(&batch, &state.items) {
            tracing::info!(name, batch_size = batch.len(), "Rejected batch with duplicate name");
            return Err(PantryError::DuplicateName(name.to_string()));
        }

        let now = (self.clock)();
        let mut created = Vec::with_capacity(batch.len());
        for input in batch {
            let item = PantryItem::new(state.allocate_id(), input, now);
            tracing::info!(item_id = item.id, count = item.count, "Created pantry item");
            created.push(item);
        }
        state.items.extend(created.iter().cloned());

        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> PantryResult<Option<PantryItem>> {
        let state = self.state.read().await;
        Ok(state.locate(id).map(|(_, item)| item.clone()))
    }

    async fn list(&self, filter: ItemFilter) -> PantryResult<Vec<PantryItem>> {
        let state = self.state.read().await;

        Ok(state
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, input: UpdatePantryItem) -> PantryResult<PantryItem> {
        let mut state = self.state.write().await;

        let index = state
            .locate(id)
            .map(|(index, _)| index)
            .ok_or(PantryError::NotFound(id))?;

        let now = (self.clock)();
        let item = &mut state.items[index];
        item.replace_with(input, now);

        tracing::info!(item_id = id, count = item.count, "Updated pantry item");
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> PantryResult<bool> {
        let mut state = self.state.write().await;

        match state.locate(id).map(|(index, _)| index) {
            Some(index) => {
                state.items.remove(index);
                tracing::info!(item_id = id, "Deleted pantry item");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> PantryResult<Vec<PantryItem>> {
        let mut state = self.state.write().await;

        let removed = state.items.len();
        state.items.clear();

        tracing::info!(removed, "Deleted all pantry items");
        Ok(state.items.clone())
    }
}
