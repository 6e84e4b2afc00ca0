//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod json_body;

pub use json_body::JsonBody;
