//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository trait
//! that stores all posts in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Scans are
//! paged like the real backend, and a fault can be injected to make every call
//! fail.
//!
//! # Example
//!
//! ```rust,ignore
//! use posts::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new().with_scan_page_size(2);
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
