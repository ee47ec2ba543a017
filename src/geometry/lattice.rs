//! Lattice points and candidate edges.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Edges must be strictly shorter than this to be encodable.
///
/// Admits horizontal, vertical and unit diagonal neighbours (length 1 and
/// √2) and excludes anything longer.
pub const ADJACENCY_THRESHOLD: f64 = 1.5;

/// Integer coordinate on the half-span lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticePoint {
    /// Horizontal coordinate, `0..=mirror_line`.
    pub x: i32,
    /// Vertical coordinate, `0..=height`.
    pub y: i32,
}

impl LatticePoint {
    /// Creates a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &LatticePoint) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Reflection about the vertical line `x = mirror_line`.
    pub fn mirrored(&self, mirror_line: i32) -> Self {
        Self {
            x: mirror_x(self.x, mirror_line),
            y: self.y,
        }
    }
}

/// Reflects an x-coordinate about `mirror_line`: `x' = 2 * mirror_line - x`.
pub fn mirror_x(x: i32, mirror_line: i32) -> i32 {
    2 * mirror_line - x
}

/// Unordered pair of lattice point indices, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateEdge {
    /// Lower lattice point index.
    pub a: usize,
    /// Higher lattice point index.
    pub b: usize,
}

/// Lattice points and candidate edges for one `(length, height)` pair.
///
/// # Examples
///
/// ```
/// use truss_ga::geometry::Geometry;
///
/// let geometry = Geometry::generate(10, 3).unwrap();
/// assert_eq!(geometry.mirror_line(), 5);
/// assert_eq!(geometry.points().len(), 6 * 4);
/// assert!(!geometry.edges().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    length: u32,
    height: u32,
    mirror_line: i32,
    points: Vec<LatticePoint>,
    edges: Vec<CandidateEdge>,
}

impl Geometry {
    /// Enumerates the half-plane lattice and its short connections.
    ///
    /// Points are ordered by `x`, then `y`. Edges are ordered by their first
    /// index, then their second, exactly as pair enumeration produces them.
    /// Deterministic in `(length, height)`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::HeightNotBelowLength`] when `height >= length`.
    pub fn generate(length: u32, height: u32) -> Result<Self, ConfigError> {
        if height >= length {
            return Err(ConfigError::HeightNotBelowLength { length, height });
        }

        let mut points = Vec::with_capacity(lattice_capacity(length / 2, height));
        let mirror_line = (length / 2) as i32;
        let height = height as i32;

        for x in 0..=mirror_line {
            for y in 0..=height {
                points.push(LatticePoint::new(x, y));
            }
        }

        let mut edges = Vec::new();
        for a in 0..points.len() {
            for b in (a + 1)..points.len() {
                if points[a].distance(&points[b]) < ADJACENCY_THRESHOLD {
                    edges.push(CandidateEdge { a, b });
                }
            }
        }

        Ok(Self {
            length,
            height: height as u32,
            mirror_line,
            points,
            edges,
        })
    }

    /// Total span the geometry was generated for.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Maximum vertical extent.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The vertical symmetry axis, `length / 2` (floor).
    pub fn mirror_line(&self) -> i32 {
        self.mirror_line
    }

    /// All lattice points, indexed `0..N`.
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// All candidate edges, indexed `0..M`.
    pub fn edges(&self) -> &[CandidateEdge] {
        &self.edges
    }

    /// Genome length `M`.
    pub fn genome_len(&self) -> usize {
        self.edges.len()
    }

    /// Endpoints of candidate edge `index`.
    ///
    /// # Panics
    /// Panics if `index >= M`.
    pub fn endpoints(&self, index: usize) -> (LatticePoint, LatticePoint) {
        let edge = self.edges[index];
        (self.points[edge.a], self.points[edge.b])
    }
}

/// Point count of a `(mirror_line + 1) x (height + 1)` lattice, or zero
/// when that does not fit in `usize`.
fn lattice_capacity(mirror_line: u32, height: u32) -> usize {
    let columns = (mirror_line as usize).checked_add(1);
    let rows = (height as usize).checked_add(1);
    columns
        .zip(rows)
        .and_then(|(c, r)| c.checked_mul(r))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_point_count_matches_half_lattice() {
        let g = Geometry::generate(10, 3).unwrap();
        // x in 0..=5, y in 0..=3
        assert_eq!(g.points().len(), 24);
        assert_eq!(g.points()[0], LatticePoint::new(0, 0));
        assert_eq!(g.points()[1], LatticePoint::new(0, 1));
        assert_eq!(g.points()[4], LatticePoint::new(1, 0));
        assert_eq!(*g.points().last().unwrap(), LatticePoint::new(5, 3));
    }

    #[test]
    fn test_odd_length_floors_mirror_line() {
        let g = Geometry::generate(7, 2).unwrap();
        assert_eq!(g.mirror_line(), 3);
        assert!(g.points().iter().all(|p| p.x <= 3));
    }

    #[test]
    fn test_edge_count_for_unit_cell() {
        // A 2x2 lattice: 4 sides + 2 diagonals.
        let g = Geometry::generate(2, 1).unwrap();
        assert_eq!(g.points().len(), 4);
        assert_eq!(g.genome_len(), 6);
    }

    #[test]
    fn test_edge_count_for_grid() {
        // (w+1)(h+1) grid with w=5, h=3:
        // horizontal 5*4, vertical 6*3, diagonals 2*5*3
        let g = Geometry::generate(10, 3).unwrap();
        assert_eq!(g.genome_len(), 20 + 18 + 30);
    }

    #[test]
    fn test_edges_are_short_and_ordered() {
        let g = Geometry::generate(12, 4).unwrap();
        for (idx, edge) in g.edges().iter().enumerate() {
            assert!(edge.a < edge.b);
            let (p, q) = g.endpoints(idx);
            assert!(p.distance(&q) < ADJACENCY_THRESHOLD);
        }
        let unique: HashSet<_> = g.edges().iter().collect();
        assert_eq!(unique.len(), g.genome_len());
    }

    #[test]
    fn test_long_diagonals_excluded() {
        let g = Geometry::generate(10, 3).unwrap();
        let far = g
            .edges()
            .iter()
            .any(|e| g.points()[e.a].distance(&g.points()[e.b]) > 1.5);
        assert!(!far);
    }

    #[test]
    fn test_mirror_stays_on_full_span() {
        let g = Geometry::generate(10, 3).unwrap();
        for p in g.points() {
            let m = p.mirrored(g.mirror_line());
            assert!(m.x >= g.mirror_line() && m.x <= 2 * g.mirror_line());
            assert_eq!(m.mirrored(g.mirror_line()), *p);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            Geometry::generate(9, 4).unwrap(),
            Geometry::generate(9, 4).unwrap()
        );
    }

    #[test]
    fn test_capacity_matches_point_count() {
        let g = Geometry::generate(10, 3).unwrap();
        assert_eq!(lattice_capacity(5, 3), g.points().len());
    }

    #[test]
    fn test_capacity_of_huge_lattice_does_not_overflow() {
        // Beyond i32 range; must neither wrap nor panic.
        let capacity = lattice_capacity(u32::MAX / 2, u32::MAX - 1);
        let expected = (u32::MAX as usize / 2 + 1).checked_mul(u32::MAX as usize);
        assert_eq!(capacity, expected.unwrap_or(0));
        assert_eq!(lattice_capacity(10_000, 10_000), 10_001 * 10_001);
    }

    // ---- Validation ----

    #[test]
    fn test_height_equal_length_rejected() {
        assert_eq!(
            Geometry::generate(3, 3),
            Err(ConfigError::HeightNotBelowLength {
                length: 3,
                height: 3
            })
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(Geometry::generate(0, 0).is_err());
    }

    #[test]
    fn test_flat_geometry_is_valid() {
        let g = Geometry::generate(4, 0).unwrap();
        assert_eq!(g.points().len(), 3);
        assert_eq!(g.genome_len(), 2);
    }
}
