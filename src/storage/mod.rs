//! Backend service implementations
//!
//! The production backend is an external managed service; only in-memory
//! implementations live in this crate.

pub mod in_memory;

pub use in_memory::{
    InMemoryAuthProvider, InMemoryBackend, InMemoryDataService, InMemoryDocumentStore,
    InMemoryProcessingGateway,
};
