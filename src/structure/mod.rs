//! Genome decoding.
//!
//! [`build`] turns a genome into a concrete, left-right symmetric structure:
//! every active candidate edge contributes its left-half element and the
//! element's reflection about the mirror line. Supports and the central point
//! load are then placed on the outermost and middle nodes.
//!
//! A genome that spans two or fewer distinct x positions cannot carry a load
//! between supports; it decodes to [`BuildOutcome::Degenerate`] instead of an
//! error.

mod builder;
mod types;

pub use builder::{build, LOAD_MAGNITUDE};
pub use types::{BuildOutcome, DecodedStructure, Element, NodeId, PointLoad, Support, SupportKind};
