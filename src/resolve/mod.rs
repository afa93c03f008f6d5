//! Identifier resolution
//!
//! Two batch transformations over central store responses:
//!
//! - [`resolve_to_cds`] reconciles a mixed gene list (external source ids,
//!   locus ids, mRNA ids) down to canonical CDS identifiers.
//! - [`resolve_cds_to_locus`] walks the is-encompassed-in relationship
//!   back up from CDS to enclosing locus.
//!
//! Both are pure functions of their inputs and the store's responses:
//! no state survives a call, and independent calls need no coordination.

pub mod forward;
pub mod reverse;

pub use forward::{resolve_to_cds, CdsResolution};
pub use reverse::resolve_cds_to_locus;
