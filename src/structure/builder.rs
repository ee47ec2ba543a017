//! Genome to structure decoding.

use super::types::{BuildOutcome, DecodedStructure, Element, NodeId, PointLoad, Support, SupportKind};
use crate::ga::Genome;
use crate::geometry::{Geometry, LatticePoint};
use std::collections::{BTreeSet, HashMap};

/// Magnitude of the downward load at the midpoint node.
pub const LOAD_MAGNITUDE: f64 = 100.0;

/// Decodes `genome` against `geometry`.
///
/// Each active gene adds the left element and its mirror. A member lying on
/// the mirror line is its own mirror, so it appears twice and carries double
/// stiffness. Nodes are deduplicated by coordinate and numbered in insertion
/// order.
///
/// Supports: hinged at the leftmost node, roller at the rightmost node
/// (first occurrence on ties). The load goes to the first node closest to
/// the middle of the x-range.
///
/// # Panics
/// Panics if `genome.len()` differs from `geometry.genome_len()`.
pub fn build(genome: &Genome, geometry: &Geometry) -> BuildOutcome {
    assert_eq!(
        genome.len(),
        geometry.genome_len(),
        "genome length must match candidate edge count"
    );

    let mirror_line = geometry.mirror_line();
    let mut assembly = Assembly::default();

    for index in genome.active_indices() {
        let (p, q) = geometry.endpoints(index);
        assembly.add_element(p, q);
        assembly.add_element(p.mirrored(mirror_line), q.mirrored(mirror_line));
    }

    let distinct_x: BTreeSet<i32> = assembly.nodes.iter().map(|n| n.x).collect();
    if distinct_x.len() <= 2 {
        return BuildOutcome::Degenerate {
            distinct_x: distinct_x.len(),
        };
    }

    // Three or more distinct x values, so the node list is non-empty.
    let min_x = *distinct_x.iter().next().unwrap_or(&0);
    let max_x = *distinct_x.iter().next_back().unwrap_or(&0);
    let middle = f64::from(min_x + max_x) / 2.0;

    let leftmost = first_position(&assembly.nodes, |n| n.x == min_x);
    let rightmost = first_position(&assembly.nodes, |n| n.x == max_x);
    let midpoint = closest_to(&assembly.nodes, middle);

    BuildOutcome::Valid(DecodedStructure {
        supports: vec![
            Support {
                node: leftmost,
                kind: SupportKind::Hinged,
            },
            Support {
                node: rightmost,
                kind: SupportKind::Roller,
            },
        ],
        loads: vec![PointLoad {
            node: midpoint,
            fx: 0.0,
            fy: -LOAD_MAGNITUDE,
        }],
        midpoint,
        span: f64::from(max_x - min_x),
        length: f64::from(max_x),
        element_count: genome.count_active(),
        mirror_line,
        nodes: assembly.nodes,
        elements: assembly.elements,
    })
}

/// Node and element accumulator with coordinate deduplication.
#[derive(Default)]
struct Assembly {
    nodes: Vec<LatticePoint>,
    ids: HashMap<LatticePoint, NodeId>,
    elements: Vec<Element>,
}

impl Assembly {
    fn node(&mut self, point: LatticePoint) -> NodeId {
        if let Some(&id) = self.ids.get(&point) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(point);
        self.ids.insert(point, id);
        id
    }

    fn add_element(&mut self, start: LatticePoint, end: LatticePoint) {
        let start = self.node(start);
        let end = self.node(end);
        self.elements.push(Element { start, end });
    }
}

fn first_position<F: Fn(&LatticePoint) -> bool>(nodes: &[LatticePoint], pred: F) -> NodeId {
    nodes.iter().position(pred).unwrap_or(0)
}

/// First node minimizing `|x - target|`.
fn closest_to(nodes: &[LatticePoint], target: f64) -> NodeId {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (id, node) in nodes.iter().enumerate() {
        let distance = (f64::from(node.x) - target).abs();
        if distance < best_distance {
            best = id;
            best_distance = distance;
        }
    }
    best
}
