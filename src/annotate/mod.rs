//! Functional annotation of resolved features
//!
//! CDS records in the central store frequently carry no function of their
//! own; the annotation lives on the enclosing locus. This module fetches
//! per-feature records for a resolved CDS set and backfills missing
//! functions from the locus, using the reverse resolver to find it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::IdResError;
use crate::resolve::{resolve_cds_to_locus, CdsResolution};
use crate::store::types::FeatureRecord;
use crate::store::{FeatureStore, RelationshipStore};

/// A set of features assembled from a resolved gene list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Free-text provenance of the set.
    pub description: String,
    /// Elements keyed by CDS id.
    pub elements: BTreeMap<String, FeatureSetElement>,
}

/// One element of a [`FeatureSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSetElement {
    /// Feature payload.
    pub data: FeatureData,
}

/// Feature payload carried by a feature set element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureData {
    /// Feature type (e.g. "CDS").
    #[serde(rename = "type")]
    pub feature_type: String,
    /// Internal feature id.
    pub id: String,
    /// DNA sequence length in base pairs.
    pub dna_sequence_length: u64,
    /// Functional annotation, possibly inherited from the locus.
    pub function: Option<String>,
    /// Alternative identifiers.
    pub aliases: Vec<String>,
}

/// Fetch feature records for a CDS set, backfilling missing functions
/// from the enclosing locus.
///
/// Records come back in input order; CDS ids the store does not know are
/// omitted. A CDS with its own function keeps it; only absent functions
/// are substituted, and only when the locus chain and the locus function
/// both resolve.
///
/// # Errors
///
/// Returns the store's error when any batched call fails.
pub fn annotate_features<S, G>(
    store: &S,
    graph: &G,
    cds_ids: &[String],
) -> Result<Vec<FeatureRecord>, IdResError>
where
    S: FeatureStore + ?Sized,
    G: RelationshipStore + ?Sized,
{
    if cds_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = store.get_features(cds_ids)?;

    let cds_to_locus = resolve_cds_to_locus(graph, cds_ids)?;
    let locus_batch: Vec<String> = cds_to_locus.values().cloned().collect();
    let locus_functions = if locus_batch.is_empty() {
        Default::default()
    } else {
        store.features_to_functions(&locus_batch)?
    };

    let mut annotated = Vec::with_capacity(records.len());
    for cds in cds_ids {
        let Some(mut record) = records.remove(cds) else {
            continue;
        };
        if record.function.as_deref().map_or(true, str::is_empty) {
            record.function = cds_to_locus
                .get(cds)
                .and_then(|locus| locus_functions.get(locus))
                .cloned();
        }
        annotated.push(record);
    }

    Ok(annotated)
}

/// Assemble a [`FeatureSet`] from a forward resolution.
///
/// Every CDS id the resolution reached becomes one element, annotated via
/// [`annotate_features`].
///
/// # Errors
///
/// Returns the store's error when any batched call fails.
pub fn build_feature_set<S, G>(
    store: &S,
    graph: &G,
    resolution: &CdsResolution,
    description: impl Into<String>,
) -> Result<FeatureSet, IdResError>
where
    S: FeatureStore + ?Sized,
    G: RelationshipStore + ?Sized,
{
    let cds_ids: Vec<String> = resolution.cds_ids().iter().cloned().collect();
    let records = annotate_features(store, graph, &cds_ids)?;

    let elements = records
        .into_iter()
        .map(|record| {
            let element = FeatureSetElement {
                data: FeatureData {
                    feature_type: record.feature_type,
                    id: record.id.clone(),
                    dna_sequence_length: record.sequence_length,
                    function: record.function,
                    aliases: record.aliases,
                },
            };
            (record.id, element)
        })
        .collect();

    Ok(FeatureSet {
        description: description.into(),
        elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_to_cds;
    use crate::store::MockStore;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locus_function_backfill() {
        let store = MockStore::with_test_data();
        // CDS.9 carries no function; its locus does.
        let records = annotate_features(&store, &store, &ids(&["kb|g.100.CDS.9"])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].function.as_deref(),
            Some("chlorophyll a-b binding protein")
        );
    }

    #[test]
    fn test_own_function_wins() {
        let store = MockStore::with_test_data();
        let records = annotate_features(&store, &store, &ids(&["kb|g.100.CDS.11"])).unwrap();
        assert_eq!(records[0].function.as_deref(), Some("serine/threonine kinase"));
    }

    #[test]
    fn test_unknown_cds_omitted() {
        let store = MockStore::with_test_data();
        let records =
            annotate_features(&store, &store, &ids(&["kb|g.100.CDS.9", "kb|g.9.CDS.404"]))
                .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let store = MockStore::with_test_data();
        assert!(annotate_features(&store, &store, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_feature_set_from_resolution() {
        let store = MockStore::with_test_data();
        let resolution =
            resolve_to_cds(&store, &ids(&["kb|g.100.locus.1", "AT1G01010"])).unwrap();
        let set =
            build_feature_set(&store, &store, &resolution, "User generated feature set").unwrap();

        assert_eq!(set.elements.len(), 2);
        let element = &set.elements["kb|g.100.CDS.9"];
        assert_eq!(element.data.feature_type, "CDS");
        assert_eq!(element.data.dna_sequence_length, 1353);
    }
}
