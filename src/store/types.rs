//! Shared wire types for central store responses.

use serde::{Deserialize, Serialize};

/// One edge returned by a relationship query.
///
/// Either end may be absent; the resolvers treat an absent end as a
/// non-match, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLink {
    /// Id of the feature the relationship points from.
    pub from: Option<String>,
    /// Id of the feature the relationship points to.
    pub to: Option<String>,
}

impl RelationshipLink {
    /// Create a link with both ends populated.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Both ends populated?
    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// Per-feature record from the central store's Feature entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Internal feature id.
    pub id: String,
    /// Feature type (e.g. "CDS", "locus", "mRNA").
    pub feature_type: String,
    /// Id the feature carries in its source database.
    pub source_id: String,
    /// DNA sequence length in base pairs.
    pub sequence_length: u64,
    /// Functional annotation, if assigned.
    pub function: Option<String>,
    /// Alternative identifiers.
    pub aliases: Vec<String>,
}
