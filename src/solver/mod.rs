//! Structural solver contract.
//!
//! The fitness evaluator consumes static analysis through the narrow
//! [`StructuralSolver`] trait: a [`DecodedStructure`] goes in, nodal
//! displacements and the structure's flexural rigidity come out, or a
//! [`SolveFailure`] explains why no solution exists.
//!
//! [`FrameSolver`] is the bundled implementation. Tests and alternative
//! backends substitute their own.

mod frame;

pub use frame::FrameSolver;

use crate::structure::{DecodedStructure, NodeId};

/// Displacement of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeDisplacement {
    /// Horizontal translation.
    pub ux: f64,
    /// Vertical translation.
    pub uy: f64,
    /// Rotation.
    pub phi: f64,
}

impl NodeDisplacement {
    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        self.ux.abs().max(self.uy.abs()).max(self.phi.abs())
    }

    /// All components finite.
    pub fn is_finite(&self) -> bool {
        self.ux.is_finite() && self.uy.is_finite() && self.phi.is_finite()
    }
}

/// A successful static analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    displacements: Vec<NodeDisplacement>,
    flexural_rigidity: f64,
}

impl Solution {
    /// Creates a solution from per-node displacements (indexed by [`NodeId`]).
    pub fn new(displacements: Vec<NodeDisplacement>, flexural_rigidity: f64) -> Self {
        Self {
            displacements,
            flexural_rigidity,
        }
    }

    /// Displacement at `node`, `None` when out of range.
    pub fn displacement(&self, node: NodeId) -> Option<NodeDisplacement> {
        self.displacements.get(node).copied()
    }

    /// All nodal displacements.
    pub fn displacements(&self) -> &[NodeDisplacement] {
        &self.displacements
    }

    /// EI of the analysed members.
    pub fn flexural_rigidity(&self) -> f64 {
        self.flexural_rigidity
    }
}

/// Why a structure could not be analysed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveFailure {
    /// The reduced stiffness matrix cannot be inverted (mechanism or
    /// disconnected part).
    #[error("singular stiffness matrix")]
    Singular,

    /// The structure description itself is unusable.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// The solver could not run at all. Unlike the other variants this aborts
    /// the generation.
    #[error("solver infrastructure failure: {0}")]
    Infrastructure(String),
}

/// Outcome of one analysis.
pub type SolveOutcome = Result<Solution, SolveFailure>;

/// Static structural analysis backend.
///
/// Must be `Send + Sync`: the evaluator may analyse individuals in parallel.
pub trait StructuralSolver: Send + Sync {
    /// Analyses `structure` under its supports and loads.
    fn solve(&self, structure: &DecodedStructure) -> SolveOutcome;
}

impl<T: StructuralSolver + ?Sized> StructuralSolver for &T {
    fn solve(&self, structure: &DecodedStructure) -> SolveOutcome {
        (**self).solve(structure)
    }
}

impl<T: StructuralSolver + ?Sized> StructuralSolver for Box<T> {
    fn solve(&self, structure: &DecodedStructure) -> SolveOutcome {
        (**self).solve(structure)
    }
}

impl<T: StructuralSolver + ?Sized> StructuralSolver for std::sync::Arc<T> {
    fn solve(&self, structure: &DecodedStructure) -> SolveOutcome {
        (**self).solve(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_abs_takes_largest_component() {
        let d = NodeDisplacement {
            ux: 0.5,
            uy: -3.0,
            phi: 1.0,
        };
        assert_eq!(d.max_abs(), 3.0);
    }

    #[test]
    fn test_non_finite_detected() {
        let d = NodeDisplacement {
            ux: f64::NAN,
            ..NodeDisplacement::default()
        };
        assert!(!d.is_finite());
    }

    #[test]
    fn test_displacement_lookup() {
        let s = Solution::new(vec![NodeDisplacement::default(); 2], 5000.0);
        assert!(s.displacement(1).is_some());
        assert!(s.displacement(2).is_none());
        assert_eq!(s.flexural_rigidity(), 5000.0);
    }
}
