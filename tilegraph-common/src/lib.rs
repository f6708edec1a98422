//! Common types for the tilegraph toolkit
//!
//! Everything a tile record refers to but does not own: the endpoint
//! identifier, the named enumerations stored as integer codes, and the
//! bounds constants that size every packed field.

pub mod constants;
pub mod error;
pub mod graph_constants;
pub mod graph_id;

pub use error::{Error, Result};
pub use graph_constants::{CycleLane, RoadClass, SpeedType, Surface, TurnType, Use};
pub use graph_id::GraphId;
