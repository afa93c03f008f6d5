// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-idres: genomic feature identifier resolver
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Gene lists from users and external databases mix opaque source ids,
//! locus ids, and mRNA ids with no shared schema. This crate reconciles
//! such lists against federated central-store services: forward to
//! canonical coding-sequence (CDS) identifiers, and backward from CDS
//! ids to the enclosing genomic loci.
//!
//! # Example
//!
//! ```
//! use ferro_idres::resolve::{resolve_cds_to_locus, resolve_to_cds};
//! use ferro_idres::MockStore;
//!
//! // A store with test data (real deployments use CentralStoreClient)
//! let store = MockStore::with_test_data();
//!
//! // Resolve a mixed identifier list to CDS ids
//! let query = vec!["kb|g.100.locus.1".to_string(), "ext123".to_string()];
//! let resolution = resolve_to_cds(&store, &query).unwrap();
//! assert!(resolution.cds_ids().contains("kb|g.100.CDS.9"));
//!
//! // Walk back up from CDS to enclosing locus
//! let cds: Vec<String> = resolution.cds_ids().iter().cloned().collect();
//! let loci = resolve_cds_to_locus(&store, &cds).unwrap();
//! assert_eq!(loci["kb|g.100.CDS.9"], "kb|g.100.locus.1");
//! ```

pub mod annotate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod resolve;
pub mod store;

// Re-export commonly used types
pub use annotate::{annotate_features, build_feature_set, FeatureSet};
pub use classify::{classify, FeatureClass};
pub use config::{Endpoints, IdResConfig};
pub use error::IdResError;
pub use resolve::{resolve_cds_to_locus, resolve_to_cds, CdsResolution};
pub use store::{CentralStoreClient, FeatureRecord, FeatureStore, MockStore, RelationshipStore};

/// Result type alias for ferro-idres operations
pub type Result<T> = std::result::Result<T, IdResError>;
