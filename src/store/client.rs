//! JSON-RPC client for the central store and id-map services.
//!
//! Both services speak the legacy JSON-RPC 1.1 dialect: one POST per call,
//! positional params, and the return value wrapped in a one-element
//! `result` array.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::IdResError;
use crate::store::provider::{FeatureStore, RelationshipStore};
use crate::store::types::{FeatureRecord, RelationshipLink};

/// Fields requested from the Feature entity.
const FEATURE_FIELDS: [&str; 5] = [
    "feature_type",
    "source_id",
    "sequence_length",
    "function",
    "alias",
];

/// Minimal JSON-RPC 1.1 transport.
struct JsonRpcClient {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<Value>,
}

impl JsonRpcClient {
    fn new(url: &str) -> Result<Self, IdResError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| IdResError::Config {
                msg: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one call and unwrap the single return value.
    fn call<R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, IdResError> {
        debug!("rpc {} -> {}", method, self.url);

        let body = json!({
            "method": method,
            "params": params,
            "version": "1.1",
            "id": "1",
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| IdResError::translation(method, e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdResError::translation(
                method,
                format!("HTTP {}", response.status()),
            ));
        }

        let rpc: RpcResponse = response
            .json()
            .map_err(|e| IdResError::malformed(method, e.to_string()))?;

        if let Some(error) = rpc.error {
            return Err(IdResError::translation(method, error.to_string()));
        }

        let first = rpc
            .result
            .and_then(|mut values| {
                if values.is_empty() {
                    None
                } else {
                    Some(values.remove(0))
                }
            })
            .ok_or_else(|| IdResError::malformed(method, "no result member"))?;

        serde_json::from_value(first).map_err(|e| IdResError::malformed(method, e.to_string()))
    }
}

/// Client for the central store (CDMI) and id-map services.
///
/// Implements [`FeatureStore`] and [`RelationshipStore`] against the real
/// endpoints; no retries are performed, a failed call surfaces as
/// [`IdResError::TranslationFailed`] for the whole batch.
pub struct CentralStoreClient {
    cdmi: JsonRpcClient,
    idmap: JsonRpcClient,
}

/// Relationship fields of an is-encompassed-in result row.
#[derive(Debug, Deserialize)]
struct WireLink {
    #[serde(default)]
    from_link: Option<String>,
    #[serde(default)]
    to_link: Option<String>,
}

/// Feature entity fields as returned by the wire (everything stringly).
#[derive(Debug, Deserialize)]
struct WireFeature {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    feature_type: Option<String>,
    #[serde(default)]
    source_id: Option<String>,
    #[serde(default)]
    sequence_length: Option<Value>,
    #[serde(default)]
    function: Option<String>,
    #[serde(default)]
    alias: Option<Vec<String>>,
}

impl WireFeature {
    fn into_record(self, id: &str) -> FeatureRecord {
        // sequence_length arrives as a number or a numeric string
        let sequence_length = match &self.sequence_length {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        };

        FeatureRecord {
            id: self.id.unwrap_or_else(|| id.to_string()),
            feature_type: self.feature_type.unwrap_or_default(),
            source_id: self.source_id.unwrap_or_default(),
            sequence_length,
            function: self.function.filter(|f| !f.is_empty()),
            aliases: self.alias.unwrap_or_default(),
        }
    }
}

impl CentralStoreClient {
    /// Create a client for the given central store and id-map endpoints.
    pub fn new(cdmi_url: &str, idmap_url: &str) -> Result<Self, IdResError> {
        Ok(Self {
            cdmi: JsonRpcClient::new(cdmi_url)?,
            idmap: JsonRpcClient::new(idmap_url)?,
        })
    }
}

impl FeatureStore for CentralStoreClient {
    fn source_ids_to_features(
        &self,
        source_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        self.cdmi
            .call("CDMI_API.source_ids_to_fids", json!([source_ids]))
    }

    fn longest_cds_from_locus(
        &self,
        locus_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        self.idmap
            .call("IdMap.longest_cds_from_locus", json!([locus_ids]))
    }

    fn longest_cds_from_mrna(
        &self,
        mrna_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, IdResError> {
        self.idmap
            .call("IdMap.longest_cds_from_mrna", json!([mrna_ids]))
    }

    fn features_to_functions(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, String>, IdResError> {
        // Unannotated features come back as null; drop them here so the
        // annotation layer can treat absence uniformly.
        let raw: HashMap<String, Option<String>> = self
            .cdmi
            .call("CDMI_API.fids_to_functions", json!([feature_ids]))?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, func)| func.filter(|f| !f.is_empty()).map(|f| (id, f)))
            .collect())
    }

    fn get_features(
        &self,
        feature_ids: &[String],
    ) -> Result<HashMap<String, FeatureRecord>, IdResError> {
        let raw: HashMap<String, WireFeature> = self.cdmi.call(
            "CDMI_EntityAPI.get_entity_Feature",
            json!([feature_ids, FEATURE_FIELDS]),
        )?;
        Ok(raw
            .into_iter()
            .map(|(id, wire)| {
                let record = wire.into_record(&id);
                (id, record)
            })
            .collect())
    }
}

impl RelationshipStore for CentralStoreClient {
    fn encompassing_features(
        &self,
        from_ids: &[String],
    ) -> Result<Vec<RelationshipLink>, IdResError> {
        // Result rows are [from-fields, relationship-fields, to-fields]
        // triples; the link ends live in the relationship fields.
        let rows: Vec<(Value, WireLink, Value)> = self.cdmi.call(
            "CDMI_EntityAPI.get_relationship_IsEncompassedIn",
            json!([from_ids, [], ["from_link", "to_link"], []]),
        )?;

        Ok(rows
            .into_iter()
            .map(|(_, link, _)| RelationshipLink {
                from: link.from_link,
                to: link.to_link,
            })
            .collect())
    }
}
