//! Packed directed-edge records for tiled routing graphs
//!
//! A [`DirectedEdge`] is a fixed 48-byte record: six little-endian 64-bit
//! words holding about forty bit-packed attributes. Records are written once
//! through [`DirectedEdgeBuilder`], which applies each field's range policy
//! and reports every correction as an [`EdgeDiagnostic`], and are read-only
//! afterwards.
//!
//! ```
//! use tilegraph_common::{GraphId, Use};
//! use tilegraph_edge::{DirectedEdge, DirectedEdgeBuilder};
//!
//! let mut builder = DirectedEdgeBuilder::new();
//! builder
//!     .set_endnode(GraphId::new(7, 1, 3).unwrap())
//!     .set_length(20_000_000)
//!     .set_use(Use::Footway);
//! let (edge, diagnostics) = builder.finish().unwrap();
//!
//! assert_eq!(edge.length(), 16_777_215);
//! assert_eq!(diagnostics.len(), 1);
//!
//! let bytes = edge.to_bytes();
//! assert_eq!(DirectedEdge::from_bytes(&bytes).unwrap(), edge);
//! ```

pub mod access;
pub mod bits;
pub mod builder;
pub mod diagnostic;
pub mod directed_edge;
pub mod error;
pub mod export;
mod layout;
pub mod slope;

pub use access::{AccessFlags, BikeNetworkFlags};
pub use bits::{EdgeFlags, PackedArray, StopImpacts, TurnTypes};
pub use builder::DirectedEdgeBuilder;
pub use diagnostic::{Correction, EdgeDiagnostic, EdgeField, Severity};
pub use directed_edge::{edges_from_bytes, edges_to_bytes, DirectedEdge, TransitSlot};
pub use error::{EdgeError, Result};
pub use export::{ClassificationExport, EdgeExport, GeoAttributes};
