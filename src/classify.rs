//! Identifier namespace classification
//!
//! Gene lists arrive as a mix of internal feature ids (`kb|g.3899.locus.2`,
//! `kb|g.3899.mRNA.2`) and opaque ids from external sources (`AT1G01010`,
//! `POPTR_0001s00200`). There is no shared schema, so classification is a
//! best-effort substring test: anything carrying the internal genome
//! namespace marker is internal, everything else needs translation before
//! it can be resolved.
//!
//! # Example
//!
//! ```
//! use ferro_idres::classify::{classify, FeatureClass};
//!
//! assert_eq!(classify("kb|g.3899.locus.2"), FeatureClass::Locus);
//! assert_eq!(classify("kb|g.3899.mRNA.2"), FeatureClass::Mrna);
//! assert_eq!(classify("AT1G01010"), FeatureClass::External);
//! ```

/// Marker identifying the internal genome namespace.
pub const GENOME_MARKER: &str = "kb|g.";

const LOCUS_MARKER: &str = "locus";
const MRNA_MARKER: &str = "mRNA";

/// Namespace of a raw identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureClass {
    /// Opaque external source identifier; must be translated before lookup.
    External,
    /// Internal locus identifier.
    Locus,
    /// Internal mRNA (transcript) identifier.
    Mrna,
    /// Internal identifier of a feature type we do not resolve (e.g. a CDS
    /// or pegged feature id). These pass through resolution unchanged:
    /// they are never batched into a locus or mRNA lookup and never error.
    OtherInternal,
}

impl FeatureClass {
    /// True for identifiers in the internal genome namespace.
    pub fn is_internal(&self) -> bool {
        !matches!(self, FeatureClass::External)
    }
}

/// Classify a raw identifier into its namespace.
///
/// Classification always succeeds. The locus test runs before the mRNA
/// test, matching the precedence the downstream lookups expect.
pub fn classify(id: &str) -> FeatureClass {
    if id.contains(GENOME_MARKER) {
        if id.contains(LOCUS_MARKER) {
            FeatureClass::Locus
        } else if id.contains(MRNA_MARKER) {
            FeatureClass::Mrna
        } else {
            FeatureClass::OtherInternal
        }
    } else {
        FeatureClass::External
    }
}
