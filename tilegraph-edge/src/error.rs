//! Error types for directed edge records

use thiserror::Error;

/// Errors raised while building or decoding directed edges
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// The edge info offset does not fit the record. The tile has outgrown
    /// the format and cannot be written.
    #[error("Exceeded maximum edge info offset: {offset} > {max}")]
    EdgeInfoOffsetOverflow { offset: u32, max: u32 },

    /// A record image has the wrong size
    #[error("Directed edge record must be {expected} bytes, got {actual}")]
    RecordLength { expected: usize, actual: usize },

    /// A buffer of records ends with a partial record
    #[error("Buffer of {len} bytes leaves {remainder} bytes after the last directed edge")]
    TrailingBytes { len: usize, remainder: usize },

    /// A one-hot mask has more than one bit set
    #[error("Corrupt {field} mask {mask:#09b}: more than one bit set")]
    NotOneHot { field: &'static str, mask: u8 },

    /// An error in one record of a buffer
    #[error("Directed edge {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<EdgeError>,
    },

    /// Identifier or enumeration code error
    #[error(transparent)]
    Common(#[from] tilegraph_common::Error),
}

/// Convenience result type for directed edge operations
pub type Result<T> = std::result::Result<T, EdgeError>;
