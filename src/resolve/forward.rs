//! Forward resolution: mixed identifier lists to CDS ids.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::classify::{classify, FeatureClass};
use crate::error::IdResError;
use crate::store::FeatureStore;

/// Outcome of a forward resolution.
///
/// Every query identifier is a key, resolved or not. A resolved entry maps
/// to the CDS id(s) its lookup returned; an unresolved entry keeps its
/// last known intermediate value (the original id, or the translated
/// feature id when translation succeeded but the CDS lookup did not).
/// Callers distinguish the two by checking [`CdsResolution::cds_ids`]
/// membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdsResolution {
    /// Query ids in first-seen input order (duplicates collapsed).
    queries: Vec<String>,
    /// Query id to resolved CDS ids, or to the last intermediate value.
    map: HashMap<String, Vec<String>>,
    /// All CDS ids resolved from any query, deduplicated.
    cds_ids: BTreeSet<String>,
}

impl CdsResolution {
    /// Values mapped for a query id.
    pub fn get(&self, query_id: &str) -> Option<&[String]> {
        self.map.get(query_id).map(|v| v.as_slice())
    }

    /// The deduplicated set of all resolved CDS ids.
    pub fn cds_ids(&self) -> &BTreeSet<String> {
        &self.cds_ids
    }

    /// True if the query id resolved all the way to at least one CDS id.
    pub fn is_resolved(&self, query_id: &str) -> bool {
        self.map
            .get(query_id)
            .is_some_and(|values| values.iter().any(|v| self.cds_ids.contains(v)))
    }

    /// Iterate entries in first-seen input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.queries
            .iter()
            .filter_map(|q| self.map.get(q).map(|v| (q.as_str(), v.as_slice())))
    }

    /// Query ids in first-seen input order.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Number of query entries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// True if no queries were made.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Resolve a mixed identifier list to canonical CDS identifiers.
///
/// Identifiers are bucketed by namespace, opaque source ids are translated
/// to internal feature ids and re-bucketed, and each non-empty bucket is
/// resolved with one batched longest-representative-CDS call. A lookup is
/// never issued for an empty bucket. Identifiers that fail translation or
/// lookup stay in the result at their last intermediate value; one
/// unresolved identifier never aborts the batch.
///
/// # Errors
///
/// Returns the store's error when a batched call itself fails; no retry is
/// attempted here.
pub fn resolve_to_cds<S: FeatureStore + ?Sized>(
    store: &S,
    query_ids: &[String],
) -> Result<CdsResolution, IdResError> {
    let mut queries: Vec<String> = Vec::new();
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let mut external: Vec<String> = Vec::new();
    let mut locus_ids: BTreeSet<String> = BTreeSet::new();
    let mut mrna_ids: BTreeSet<String> = BTreeSet::new();

    // Partition into namespace buckets, seeding each entry with itself.
    for id in query_ids {
        if map.contains_key(id) {
            continue;
        }
        map.insert(id.clone(), vec![id.clone()]);
        queries.push(id.clone());
        match classify(id) {
            FeatureClass::External => external.push(id.clone()),
            FeatureClass::Locus => {
                locus_ids.insert(id.clone());
            }
            FeatureClass::Mrna => {
                mrna_ids.insert(id.clone());
            }
            FeatureClass::OtherInternal => {}
        }
    }

    // Translate source ids to internal feature ids and re-bucket each
    // translated id; it may name a locus or an mRNA.
    if !external.is_empty() {
        let translated = store.source_ids_to_features(&external)?;
        for (source_id, feature_ids) in &translated {
            if feature_ids.is_empty() {
                continue;
            }
            let Some(entry) = map.get_mut(source_id) else {
                // Services may echo ids we never asked about; the result
                // key set stays exactly the query set.
                continue;
            };
            *entry = dedup_ordered(feature_ids);
            for fid in feature_ids {
                match classify(fid) {
                    FeatureClass::Locus => {
                        locus_ids.insert(fid.clone());
                    }
                    FeatureClass::Mrna => {
                        mrna_ids.insert(fid.clone());
                    }
                    _ => {}
                }
            }
        }
    }

    let locus_cds = lookup_bucket(&locus_ids, |ids| store.longest_cds_from_locus(ids))?;
    let mrna_cds = lookup_bucket(&mrna_ids, |ids| store.longest_cds_from_mrna(ids))?;

    let mut cds_ids: BTreeSet<String> = BTreeSet::new();
    for cds in locus_cds.values().flatten() {
        cds_ids.insert(cds.clone());
    }
    for cds in mrna_cds.values().flatten() {
        cds_ids.insert(cds.clone());
    }

    // Second pass: rewrite each entry to the CDS ids its chain reached.
    for query_id in &queries {
        match classify(query_id) {
            FeatureClass::Locus => {
                rewrite_direct(&mut map, query_id, &locus_cds);
            }
            FeatureClass::Mrna => {
                rewrite_direct(&mut map, query_id, &mrna_cds);
            }
            FeatureClass::External => {
                rewrite_translated(&mut map, query_id, &locus_cds, &mrna_cds);
            }
            FeatureClass::OtherInternal => {}
        }
    }

    debug!(
        "resolved {} query ids to {} CDS ids",
        queries.len(),
        cds_ids.len()
    );

    Ok(CdsResolution {
        queries,
        map,
        cds_ids,
    })
}

/// Run one batched CDS lookup, skipping the call for an empty bucket.
fn lookup_bucket<F>(ids: &BTreeSet<String>, lookup: F) -> Result<HashMap<String, Vec<String>>, IdResError>
where
    F: FnOnce(&[String]) -> Result<HashMap<String, Vec<String>>, IdResError>,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let batch: Vec<String> = ids.iter().cloned().collect();
    lookup(&batch)
}

/// Replace a directly-classified entry with its looked-up CDS ids, if any.
fn rewrite_direct(
    map: &mut HashMap<String, Vec<String>>,
    query_id: &str,
    lookup: &HashMap<String, Vec<String>>,
) {
    if let Some(cds) = lookup.get(query_id) {
        if !cds.is_empty() {
            map.insert(query_id.to_string(), dedup_ordered(cds));
        }
    }
}

/// Replace a translated entry with the CDS ids reached through its
/// intermediate feature ids, if any chain completed.
fn rewrite_translated(
    map: &mut HashMap<String, Vec<String>>,
    query_id: &str,
    locus_cds: &HashMap<String, Vec<String>>,
    mrna_cds: &HashMap<String, Vec<String>>,
) {
    let Some(intermediates) = map.get(query_id) else {
        return;
    };

    let mut resolved: Vec<String> = Vec::new();
    for fid in intermediates {
        let lookup = match classify(fid) {
            FeatureClass::Locus => locus_cds,
            FeatureClass::Mrna => mrna_cds,
            _ => continue,
        };
        if let Some(cds) = lookup.get(fid) {
            for c in cds {
                if !resolved.contains(c) {
                    resolved.push(c.clone());
                }
            }
        }
    }

    if !resolved.is_empty() {
        map.insert(query_id.to_string(), resolved);
    }
}

fn dedup_ordered(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockStore;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locus_and_translated_source_id() {
        let store = MockStore::with_test_data();
        let resolution =
            resolve_to_cds(&store, &ids(&["kb|g.100.locus.1", "ext123"])).unwrap();

        assert_eq!(
            resolution.get("kb|g.100.locus.1"),
            Some(&["kb|g.100.CDS.9".to_string()][..])
        );
        assert_eq!(
            resolution.get("ext123"),
            Some(&["kb|g.100.CDS.9".to_string()][..])
        );
        let expected: BTreeSet<String> = ["kb|g.100.CDS.9".to_string()].into_iter().collect();
        assert_eq!(resolution.cds_ids(), &expected);
    }

    #[test]
    fn test_unresolved_id_kept_in_map_but_not_in_cds_set() {
        let store = MockStore::with_test_data();
        let resolution = resolve_to_cds(&store, &ids(&["unknown999"])).unwrap();

        assert_eq!(resolution.get("unknown999"), Some(&["unknown999".to_string()][..]));
        assert!(resolution.cds_ids().is_empty());
        assert!(!resolution.is_resolved("unknown999"));
    }

    #[test]
    fn test_translated_but_unlooked_up_keeps_intermediate() {
        let mut store = MockStore::new();
        store.add_source_mapping("ext9", &["kb|g.5.mRNA.1"]);
        // No mRNA lookup entry: the chain stops at the translated id.
        let resolution = resolve_to_cds(&store, &ids(&["ext9"])).unwrap();

        assert_eq!(resolution.get("ext9"), Some(&["kb|g.5.mRNA.1".to_string()][..]));
        assert!(resolution.cds_ids().is_empty());
    }

    #[test]
    fn test_duplicates_collapse_to_one_entry() {
        let store = MockStore::with_test_data();
        let resolution =
            resolve_to_cds(&store, &ids(&["kb|g.100.locus.1", "kb|g.100.locus.1"])).unwrap();
        assert_eq!(resolution.len(), 1);
    }

    #[test]
    fn test_other_internal_passes_through() {
        let store = MockStore::with_test_data();
        let resolution = resolve_to_cds(&store, &ids(&["kb|g.100.CDS.9"])).unwrap();

        // Already-canonical ids are not re-looked-up and stay self-mapped.
        assert_eq!(
            resolution.get("kb|g.100.CDS.9"),
            Some(&["kb|g.100.CDS.9".to_string()][..])
        );
        assert!(resolution.cds_ids().is_empty());
    }

    #[test]
    fn test_fanout_keeps_every_cds() {
        let mut store = MockStore::new();
        store.add_locus_cds("kb|g.7.locus.1", &["kb|g.7.CDS.1", "kb|g.7.CDS.2"]);
        let resolution = resolve_to_cds(&store, &ids(&["kb|g.7.locus.1"])).unwrap();

        assert_eq!(
            resolution.get("kb|g.7.locus.1"),
            Some(&["kb|g.7.CDS.1".to_string(), "kb|g.7.CDS.2".to_string()][..])
        );
        assert_eq!(resolution.cds_ids().len(), 2);
    }

    #[test]
    fn test_shared_cds_deduplicated_in_set() {
        let store = MockStore::with_test_data();
        // locus.1 and mRNA.5 both resolve to CDS.9
        let resolution =
            resolve_to_cds(&store, &ids(&["kb|g.100.locus.1", "kb|g.100.mRNA.5"])).unwrap();
        assert_eq!(resolution.cds_ids().len(), 1);
    }

    #[test]
    fn test_iteration_preserves_input_order() {
        let store = MockStore::with_test_data();
        let input = ids(&["ext123", "kb|g.100.locus.1", "unknown999"]);
        let resolution = resolve_to_cds(&store, &input).unwrap();
        let order: Vec<&str> = resolution.iter().map(|(q, _)| q).collect();
        assert_eq!(order, vec!["ext123", "kb|g.100.locus.1", "unknown999"]);
    }
}
