//! CLI utilities for ferro-idres
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the
//! library, we enable unit testing without end-to-end CLI tests.

use std::collections::BTreeMap;
use std::io::{self, BufRead};

use serde_json::json;

use crate::annotate::FeatureSet;
use crate::resolve::CdsResolution;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated lines.
    Text,
    /// JSON document.
    Json,
}

impl OutputFormat {
    /// Parse a format name as accepted by the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Parse a user-supplied gene list.
///
/// Gene lists are comma separated and frequently arrive with embedded
/// spaces, which are stripped before splitting. Empty segments are
/// dropped.
///
/// # Examples
///
/// ```
/// use ferro_idres::cli::parse_gene_list;
///
/// assert_eq!(
///     parse_gene_list("kb|g.100.locus.1, ext123"),
///     vec!["kb|g.100.locus.1".to_string(), "ext123".to_string()]
/// );
/// assert!(parse_gene_list("").is_empty());
/// ```
pub fn parse_gene_list(raw: &str) -> Vec<String> {
    raw.replace(' ', "")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Read identifiers from a reader, one per line.
///
/// Blank lines and `#` comment lines are skipped; each remaining line may
/// itself be a comma separated list.
pub fn read_id_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        ids.extend(parse_gene_list(line));
    }
    Ok(ids)
}

/// Render a forward resolution.
///
/// Text form is one `query<TAB>values` line per entry in input order,
/// with a trailing `# cds:` summary line for the deduplicated set.
pub fn format_resolution(resolution: &CdsResolution, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (query, values) in resolution.iter() {
                out.push_str(query);
                out.push('\t');
                out.push_str(&values.join(","));
                out.push('\n');
            }
            let cds: Vec<&str> = resolution.cds_ids().iter().map(|s| s.as_str()).collect();
            out.push_str(&format!("# cds: {}\n", cds.join(",")));
            out
        }
        OutputFormat::Json => {
            let resolved: BTreeMap<&str, &[String]> = resolution.iter().collect();
            let doc = json!({
                "resolved": resolved,
                "cds_ids": resolution.cds_ids(),
            });
            format!("{:#}\n", doc)
        }
    }
}

/// Render a CDS to locus map.
pub fn format_locus_map(loci: &BTreeMap<String, String>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (cds, locus) in loci {
                out.push_str(&format!("{}\t{}\n", cds, locus));
            }
            out
        }
        OutputFormat::Json => format!("{:#}\n", json!(loci)),
    }
}

/// Render a feature set.
///
/// Text form is one line per element: id, type, length, function.
pub fn format_feature_set(set: &FeatureSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (id, element) in &set.elements {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    id,
                    element.data.feature_type,
                    element.data.dna_sequence_length,
                    element.data.function.as_deref().unwrap_or("-"),
                ));
            }
            out
        }
        OutputFormat::Json => format!(
            "{}\n",
            serde_json::to_string_pretty(set).unwrap_or_else(|_| "{}".to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_to_cds;
    use crate::store::MockStore;

    #[test]
    fn test_parse_gene_list_strips_spaces() {
        assert_eq!(
            parse_gene_list(" kb|g.1.locus.1 , ext123 "),
            vec!["kb|g.1.locus.1".to_string(), "ext123".to_string()]
        );
    }

    #[test]
    fn test_read_id_lines_skips_comments() {
        let input = "# header\nkb|g.100.locus.1,ext123\n\nunknown999\n";
        let ids = read_id_lines(input.as_bytes()).unwrap();
        assert_eq!(
            ids,
            vec![
                "kb|g.100.locus.1".to_string(),
                "ext123".to_string(),
                "unknown999".to_string()
            ]
        );
    }

    #[test]
    fn test_format_resolution_text() {
        let store = MockStore::with_test_data();
        let input = vec!["kb|g.100.locus.1".to_string()];
        let resolution = resolve_to_cds(&store, &input).unwrap();
        let text = format_resolution(&resolution, OutputFormat::Text);
        assert!(text.contains("kb|g.100.locus.1\tkb|g.100.CDS.9"));
        assert!(text.contains("# cds: kb|g.100.CDS.9"));
    }

    #[test]
    fn test_format_resolution_json_is_valid() {
        let store = MockStore::with_test_data();
        let input = vec!["ext123".to_string()];
        let resolution = resolve_to_cds(&store, &input).unwrap();
        let rendered = format_resolution(&resolution, OutputFormat::Json);
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["resolved"]["ext123"][0], "kb|g.100.CDS.9");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}
