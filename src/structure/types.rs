//! Decoded structure representation handed to the solver.

use crate::geometry::LatticePoint;

/// Index into [`DecodedStructure::nodes`], in insertion order.
pub type NodeId = usize;

/// A line element between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// First node.
    pub start: NodeId,
    /// Second node.
    pub end: NodeId,
}

/// Boundary condition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportKind {
    /// Restrains both translations, rotation free.
    Hinged,
    /// Restrains vertical translation only.
    Roller,
}

/// A support attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Support {
    /// Supported node.
    pub node: NodeId,
    /// Boundary condition.
    pub kind: SupportKind,
}

/// A concentrated force on a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLoad {
    /// Loaded node.
    pub node: NodeId,
    /// Horizontal component.
    pub fx: f64,
    /// Vertical component (negative is downward).
    pub fy: f64,
}

/// A symmetric structure ready for static analysis.
///
/// Rebuilt from its genome every generation and discarded after scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStructure {
    pub(crate) nodes: Vec<LatticePoint>,
    pub(crate) elements: Vec<Element>,
    pub(crate) supports: Vec<Support>,
    pub(crate) loads: Vec<PointLoad>,
    pub(crate) midpoint: NodeId,
    pub(crate) span: f64,
    pub(crate) length: f64,
    pub(crate) element_count: usize,
    pub(crate) mirror_line: i32,
}

impl DecodedStructure {
    /// Node coordinates in insertion order.
    pub fn nodes(&self) -> &[LatticePoint] {
        &self.nodes
    }

    /// Elements, left-half originals interleaved with their mirrors.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Hinged support first, roller second.
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Applied point loads.
    pub fn loads(&self) -> &[PointLoad] {
        &self.loads
    }

    /// Node carrying the central load.
    pub fn midpoint(&self) -> NodeId {
        self.midpoint
    }

    /// Horizontal distance between the outermost nodes.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Largest node x coordinate, the length weighted in the combined
    /// fitness. Equals [`span`](Self::span) when the structure reaches x = 0.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of active genes. Mirrored elements are not counted.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Symmetry axis the structure was reflected about.
    pub fn mirror_line(&self) -> i32 {
        self.mirror_line
    }

    /// Start and end coordinates of an element.
    pub fn element_coordinates(&self, element: &Element) -> (LatticePoint, LatticePoint) {
        (self.nodes[element.start], self.nodes[element.end])
    }
}

/// Result of decoding one genome.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// The genome decoded to an analysable structure.
    Valid(DecodedStructure),
    /// Two or fewer distinct x positions: no usable span.
    Degenerate {
        /// Number of distinct x positions found.
        distinct_x: usize,
    },
}

impl BuildOutcome {
    /// The structure, when valid.
    pub fn structure(&self) -> Option<&DecodedStructure> {
        match self {
            BuildOutcome::Valid(structure) => Some(structure),
            BuildOutcome::Degenerate { .. } => None,
        }
    }

    /// Consumes the outcome, returning the structure when valid.
    pub fn into_structure(self) -> Option<DecodedStructure> {
        match self {
            BuildOutcome::Valid(structure) => Some(structure),
            BuildOutcome::Degenerate { .. } => None,
        }
    }

    /// Span length, zero when degenerate.
    pub fn span(&self) -> f64 {
        self.structure().map_or(0.0, DecodedStructure::span)
    }

    /// Fitness length, zero when degenerate.
    pub fn length(&self) -> f64 {
        self.structure().map_or(0.0, DecodedStructure::length)
    }

    /// Element count, zero when degenerate.
    pub fn element_count(&self) -> usize {
        self.structure().map_or(0, DecodedStructure::element_count)
    }
}
