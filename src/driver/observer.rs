//! Visualisation hook.

use crate::structure::{DecodedStructure, SupportKind};

/// Receives the best structure of selected generations.
///
/// Observers only look; they cannot influence the run. Any
/// `FnMut(usize, &DecodedStructure)` closure is an observer.
pub trait StructureObserver {
    /// Called with the generation index and its fittest decoded structure.
    fn observe(&mut self, generation: usize, structure: &DecodedStructure);
}

impl<F: FnMut(usize, &DecodedStructure)> StructureObserver for F {
    fn observe(&mut self, generation: usize, structure: &DecodedStructure) {
        self(generation, structure)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StructureObserver for NoopObserver {
    fn observe(&mut self, _generation: usize, _structure: &DecodedStructure) {}
}

/// Text drawing of a structure, top row first.
///
/// Lattice points sit on even columns and rows. Members are drawn as `-`,
/// `|`, `/` and `\` between them, crossing diagonals as `X`. Nodes are `o`,
/// the hinged support `H`, the roller `R` and the loaded node `v`.
///
/// ```
/// use truss_ga::driver::render_ascii;
/// use truss_ga::ga::Genome;
/// use truss_ga::geometry::Geometry;
/// use truss_ga::structure::build;
///
/// let geometry = Geometry::generate(4, 1).unwrap();
/// let genes = (0..geometry.genome_len())
///     .map(|i| {
///         let (a, b) = geometry.endpoints(i);
///         a.y == 0 && b.y == 0
///     })
///     .collect();
/// let structure = build(&Genome::new(genes), &geometry).into_structure().unwrap();
/// assert_eq!(render_ascii(&structure), "H-o-v-o-R\n");
/// ```
pub fn render_ascii(structure: &DecodedStructure) -> String {
    let nodes = structure.nodes();
    let (Some(min_x), Some(max_x), Some(max_y)) = (
        nodes.iter().map(|n| n.x).min(),
        nodes.iter().map(|n| n.x).max(),
        nodes.iter().map(|n| n.y).max(),
    ) else {
        return String::new();
    };
    let min_y = nodes.iter().map(|n| n.y).min().unwrap_or(0).min(0);

    let width = ((max_x - min_x) * 2 + 1) as usize;
    let height = ((max_y - min_y) * 2 + 1) as usize;
    let mut grid = vec![vec![' '; width]; height];
    let cell = |x: i32, y: i32| (((max_y - y) * 2) as usize, ((x - min_x) * 2) as usize);

    for element in structure.elements() {
        let (p, q) = structure.element_coordinates(element);
        let (r1, c1) = cell(p.x, p.y);
        let (r2, c2) = cell(q.x, q.y);
        let (row, col) = ((r1 + r2) / 2, (c1 + c2) / 2);
        let glyph = match (p.x == q.x, p.y == q.y) {
            (true, _) => '|',
            (_, true) => '-',
            _ if (q.x - p.x).signum() == (q.y - p.y).signum() => '/',
            _ => '\\',
        };
        let slot = &mut grid[row][col];
        *slot = match (*slot, glyph) {
            ('/', '\\') | ('\\', '/') => 'X',
            _ => glyph,
        };
    }

    for (id, node) in nodes.iter().enumerate() {
        let (row, col) = cell(node.x, node.y);
        grid[row][col] = 'o';
        if id == structure.midpoint() {
            grid[row][col] = 'v';
        }
    }
    for support in structure.supports() {
        let node = nodes[support.node];
        let (row, col) = cell(node.x, node.y);
        grid[row][col] = match support.kind {
            SupportKind::Hinged => 'H',
            SupportKind::Roller => 'R',
        };
    }

    let mut out = String::with_capacity(height * (width + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}
