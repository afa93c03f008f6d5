//! Mock store for testing

use std::collections::HashMap;

use crate::error::IdResError;
use crate::store::provider::{FeatureStore, RelationshipStore};
use crate::store::types::{FeatureRecord, RelationshipLink};

/// Mock store backed by in-memory maps.
///
/// Implements both [`FeatureStore`] and [`RelationshipStore`] so a single
/// instance can drive the forward resolver, the reverse resolver, and the
/// annotation layer in tests.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    source_to_features: HashMap<String, Vec<String>>,
    locus_to_cds: HashMap<String, Vec<String>>,
    mrna_to_cds: HashMap<String, Vec<String>>,
    functions: HashMap<String, String>,
    features: HashMap<String, FeatureRecord>,
    encompassed_in: HashMap<String, String>,
}

impl MockStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an opaque source id to internal feature ids.
    pub fn add_source_mapping(&mut self, source_id: impl Into<String>, feature_ids: &[&str]) {
        self.source_to_features.insert(
            source_id.into(),
            feature_ids.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Map a locus id to its longest representative CDS id(s).
    pub fn add_locus_cds(&mut self, locus_id: impl Into<String>, cds_ids: &[&str]) {
        self.locus_to_cds.insert(
            locus_id.into(),
            cds_ids.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Map an mRNA id to its longest representative CDS id(s).
    pub fn add_mrna_cds(&mut self, mrna_id: impl Into<String>, cds_ids: &[&str]) {
        self.mrna_to_cds.insert(
            mrna_id.into(),
            cds_ids.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Assign a functional annotation to a feature id.
    pub fn add_function(&mut self, feature_id: impl Into<String>, function: impl Into<String>) {
        self.functions.insert(feature_id.into(), function.into());
    }

    /// Add a full feature record.
    pub fn add_feature(&mut self, record: FeatureRecord) {
        self.features.insert(record.id.clone(), record);
    }

    /// Record that `from` is encompassed in `to` (CDS in mRNA, mRNA in locus).
    pub fn add_encompassed(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.encompassed_in.insert(from.into(), to.into());
    }

    /// Create a store with a small test genome.
    ///
    /// Genome kb|g.100 carries one locus whose transcript kb|g.100.mRNA.5
    /// encodes kb|g.100.CDS.9, plus a second locus/transcript pair, and a
    /// source-db alias for the first transcript.
    pub fn with_test_data() -> Self {
        let mut store = Self::new();

        store.add_source_mapping("ext123", &["kb|g.100.mRNA.5"]);
        store.add_source_mapping("AT1G01010", &["kb|g.100.locus.2"]);

        store.add_locus_cds("kb|g.100.locus.1", &["kb|g.100.CDS.9"]);
        store.add_locus_cds("kb|g.100.locus.2", &["kb|g.100.CDS.11"]);
        store.add_mrna_cds("kb|g.100.mRNA.5", &["kb|g.100.CDS.9"]);
        store.add_mrna_cds("kb|g.100.mRNA.7", &["kb|g.100.CDS.11"]);

        store.add_encompassed("kb|g.100.CDS.9", "kb|g.100.mRNA.5");
        store.add_encompassed("kb|g.100.CDS.11", "kb|g.100.mRNA.7");
        store.add_encompassed("kb|g.100.mRNA.5", "kb|g.100.locus.1");
        store.add_encompassed("kb|g.100.mRNA.7", "kb|g.100.locus.2");

        store.add_function("kb|g.100.locus.1", "chlorophyll a-b binding protein");
        store.add_function("kb|g.100.CDS.11", "serine/threonine kinase");

        store.add_feature(FeatureRecord {
            id: "kb|g.100.CDS.9".to_string(),
            feature_type: "CDS".to_string(),
            source_id: "ext123".to_string(),
            sequence_length: 1353,
            function: None,
            aliases: vec!["ext123".to_string()],
        });
        store.add_feature(FeatureRecord {
            id: "kb|g.100.CDS.11".to_string(),
            feature_type: "CDS".to_string(),
            source_id: "AT1G01010".to_string(),
            sequence_length: 890,
            function: Some("serine/threonine kinase".to_string()),
            aliases: vec!["AT1G01010".to_string(), "NAC001".to_string()],
        });

        store
    }

    fn lookup_batch(
        table: &HashMap<String, Vec<String>>,
        ids: &[String],
    ) -> HashMap<String, Vec<String>> {
        ids.iter()
            .filter_map(|id| table.get(id).map(|v| (id.clone(), v.clone())))
            .collect()
    }
}

impl FeatureStore for MockStore {
    fn source_ids_to_features(
        &self,
        source_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        Ok(Self::lookup_batch(&self.source_to_features, source_ids))
    }

    fn longest_cds_from_locus(
        &self,
        locus_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        Ok(Self::lookup_batch(&self.locus_to_cds, locus_ids))
    }

    fn longest_cds_from_mrna(
        &self,
        mrna_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        Ok(Self::lookup_batch(&self.mrna_to_cds, mrna_ids))
    }

    fn features_to_functions(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, String>, IdResError> {
        Ok(feature_ids
            .iter()
            .filter_map(|id| self.functions.get(id).map(|f| (id.clone(), f.clone())))
            .collect())
    }

    fn get_features(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, FeatureRecord>, IdResError> {
        Ok(feature_ids
            .iter()
            .filter_map(|id| self.features.get(id).map(|r| (id.clone(), r.clone())))
            .collect())
    }
}

impl RelationshipStore for MockStore {
    fn encompassing_features(
        &self,
        from_ids: &[String],
    ) -> Result<Vec<RelationshipLink>, IdResError> {
        Ok(from_ids
            .iter()
            .filter_map(|id| {
                self.encompassed_in
                    .get(id)
                    .map(|to| RelationshipLink::new(id.clone(), to.clone()))
            })
            .collect())
    }
}
