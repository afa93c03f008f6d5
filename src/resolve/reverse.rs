//! Reverse resolution: CDS ids back to enclosing loci.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::error::IdResError;
use crate::store::types::RelationshipLink;
use crate::store::RelationshipStore;

/// Map CDS identifiers to their enclosing locus identifiers.
///
/// Two chained is-encompassed-in queries: CDS to mRNA, then mRNA to locus.
/// Only chains where both hops resolved are reported; a CDS missing either
/// hop is absent from the output rather than mapped to a partial value.
/// An empty input returns an empty map without touching the store.
///
/// # Errors
///
/// Returns the store's error when either relationship query fails.
pub fn resolve_cds_to_locus<S: RelationshipStore + ?Sized>(
    store: &S,
    cds_ids: &[String],
) -> Result<BTreeMap<String, String>, IdResError> {
    if cds_ids.is_empty() {
        return Ok(BTreeMap::new());
    }

    let cds_to_mrna = keep_complete(store.encompassing_features(cds_ids)?);
    if cds_to_mrna.is_empty() {
        debug!("no encompassing mRNAs for {} CDS ids", cds_ids.len());
        return Ok(BTreeMap::new());
    }

    let mrna_batch: Vec<String> = cds_to_mrna
        .values()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let mrna_to_locus = keep_complete(store.encompassing_features(&mrna_batch)?);

    let composed: BTreeMap<String, String> = cds_ids
        .iter()
        .filter_map(|cds| {
            let mrna = cds_to_mrna.get(cds)?;
            let locus = mrna_to_locus.get(mrna)?;
            Some((cds.clone(), locus.clone()))
        })
        .collect();

    Ok(composed)
}

/// Keep only links with both ends populated, as a from-to map.
///
/// Absent ends are non-matches by contract; a later link for the same
/// `from` id overwrites an earlier one (the relationship is functional).
fn keep_complete(links: Vec<RelationshipLink>) -> HashMap<String, String> {
    links
        .into_iter()
        .filter_map(|link| match (link.from, link.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockStore;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_chain() {
        let store = MockStore::with_test_data();
        let loci = resolve_cds_to_locus(&store, &ids(&["kb|g.100.CDS.9"])).unwrap();
        assert_eq!(
            loci.get("kb|g.100.CDS.9").map(|s| s.as_str()),
            Some("kb|g.100.locus.1")
        );
    }

    #[test]
    fn test_empty_input_short_circuits() {
        // A store whose every call fails proves nothing was invoked.
        struct ExplodingStore;
        impl RelationshipStore for ExplodingStore {
            fn encompassing_features(
                &self,
                _from_ids: &[String],
            ) -> Result<Vec<RelationshipLink>, IdResError> {
                Err(IdResError::translation("relationship", "should not be called"))
            }
        }

        let loci = resolve_cds_to_locus(&ExplodingStore, &[]).unwrap();
        assert!(loci.is_empty());
    }

    #[test]
    fn test_missing_second_hop_drops_chain() {
        let mut store = MockStore::new();
        store.add_encompassed("kb|g.1.CDS.1", "kb|g.1.mRNA.1");
        // No mRNA.1 -> locus link recorded.
        let loci = resolve_cds_to_locus(&store, &ids(&["kb|g.1.CDS.1"])).unwrap();
        assert!(loci.is_empty());
    }

    #[test]
    fn test_missing_first_hop_drops_chain() {
        let store = MockStore::with_test_data();
        let loci =
            resolve_cds_to_locus(&store, &ids(&["kb|g.100.CDS.9", "kb|g.999.CDS.1"])).unwrap();
        assert_eq!(loci.len(), 1);
        assert!(!loci.contains_key("kb|g.999.CDS.1"));
    }

    #[test]
    fn test_keep_complete_drops_dangling_links() {
        let links = vec![
            RelationshipLink::new("a", "b"),
            RelationshipLink {
                from: Some("c".to_string()),
                to: None,
            },
            RelationshipLink {
                from: None,
                to: Some("d".to_string()),
            },
        ];
        let complete = keep_complete(links);
        assert_eq!(complete.len(), 1);
        assert_eq!(complete.get("a").map(|s| s.as_str()), Some("b"));
    }
}
