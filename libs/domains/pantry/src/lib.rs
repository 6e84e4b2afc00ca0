//! Pantry Domain
//!
//! Tracks household pantry items in memory: what is stored, how many are left,
//! when they expire, and whether they need to be bought again.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /pantryItems and /pantryItem/{id}
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Not-found mapping, single vs batch create
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Locked store, id allocation, duplicate checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, filters, derived flags
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_pantry::{
//!     handlers,
//!     repository::InMemoryPantryRepository,
//!     service::PantryService,
//! };
//!
//! let repository = InMemoryPantryRepository::new();
//! let service = PantryService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{PantryError, PantryResult};
pub use handlers::ApiDoc;
pub use models::{
    CreatePantryItem, CreatePayload, CreatedItems, ItemFilter, ItemQuery, PantryItem,
    UpdatePantryItem,
};
pub use repository::{Clock, InMemoryPantryRepository, PantryRepository};
pub use service::PantryService;
