//! Store traits
//!
//! Defines the interfaces the resolvers depend on.

use std::collections::HashMap;

use crate::error::IdResError;
use crate::store::types::{FeatureRecord, RelationshipLink};

/// Trait for the feature directory: source-id translation, representative
/// CDS lookups, and per-feature annotation data.
///
/// Implementations might include:
/// - MockStore for testing
/// - CentralStoreClient for remote JSON-RPC services
///
/// All methods take batches and return sparse mappings: an id absent from
/// the returned map simply did not resolve, which callers must tolerate.
pub trait FeatureStore {
    /// Translate opaque source ids to internal feature ids.
    fn source_ids_to_features(
        &self,
        source_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError>;

    /// Longest representative CDS id(s) for each locus id.
    fn longest_cds_from_locus(
        &self,
        locus_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError>;

    /// Longest representative CDS id(s) for each mRNA id.
    fn longest_cds_from_mrna(
        &self,
        mrna_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError>;

    /// Functional annotation for each feature id, where assigned.
    fn features_to_functions(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, String>, IdResError>;

    /// Full per-feature records (type, source id, length, function, aliases).
    fn get_features(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, FeatureRecord>, IdResError>;
}

/// Trait for the generic entity-relationship graph.
pub trait RelationshipStore {
    /// Query the is-encompassed-in relationship for a batch of feature ids.
    ///
    /// Each returned link points from a queried feature to the feature
    /// that encompasses it (CDS to mRNA, mRNA to locus). Links with an
    /// absent end are non-matches, not errors.
    fn encompassing_features(
        &self,
        from_ids: &[String],
    ) -> Result<Vec<RelationshipLink>, IdResError>;
}

/// Blanket implementation for boxed trait objects
impl FeatureStore for Box<dyn FeatureStore> {
    fn source_ids_to_features(
        &self,
        source_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        (**self).source_ids_to_features(source_ids)
    }

    fn longest_cds_from_locus(
        &self,
        locus_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        (**self).longest_cds_from_locus(locus_ids)
    }

    fn longest_cds_from_mrna(
        &self,
        mrna_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        (**self).longest_cds_from_mrna(mrna_ids)
    }

    fn features_to_functions(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, String>, IdResError> {
        (**self).features_to_functions(feature_ids)
    }

    fn get_features(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, FeatureRecord>, IdResError> {
        (**self).get_features(feature_ids)
    }
}

/// Blanket implementation for boxed trait objects
impl RelationshipStore for Box<dyn RelationshipStore> {
    fn encompassing_features(
        &self,
        from_ids: &[String],
    ) -> Result<Vec<RelationshipLink>, IdResError> {
        (**self).encompassing_features(from_ids)
    }
}
