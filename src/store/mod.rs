//! Central store access
//!
//! The resolvers consume four external collaborator capabilities: a
//! source-id translator, two longest-representative-CDS lookups, and a
//! generic entity-relationship query. This module defines the traits for
//! those capabilities, wire types shared by implementations, a JSON-RPC
//! client for real services, and an in-memory mock for tests.

pub mod client;
pub mod mock;
pub mod provider;
pub mod types;

pub use client::CentralStoreClient;
pub use mock::MockStore;
pub use provider::{FeatureStore, RelationshipStore};
pub use types::{FeatureRecord, RelationshipLink};
