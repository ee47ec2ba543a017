//! Candidate geometry for symmetric trusses.
//!
//! Only the left half of a structure is encoded. [`Geometry::generate`]
//! enumerates the integer lattice between `x = 0` and the mirror line, then
//! every pair of lattice points closer than [`ADJACENCY_THRESHOLD`]. Each such
//! pair is a [`CandidateEdge`], and a genome holds one bit per edge.
//!
//! The geometry is computed once per run and shared read-only by every
//! individual in every generation.

mod lattice;

pub use lattice::{mirror_x, CandidateEdge, Geometry, LatticePoint, ADJACENCY_THRESHOLD};
