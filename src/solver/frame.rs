//! Direct-stiffness solver for 2D frames with rigid joints.

use super::{NodeDisplacement, Solution, SolveFailure, SolveOutcome, StructuralSolver};
use crate::structure::{DecodedStructure, SupportKind};
use nalgebra::{DMatrix, DVector, SMatrix};

/// Degrees of freedom per node: ux, uy, rotation.
const DOF: usize = 3;

type ElementMatrix = SMatrix<f64, 6, 6>;

/// Linear-elastic Euler-Bernoulli frame analysis.
///
/// Every member shares the same axial (`EA`) and flexural (`EI`) rigidity.
/// The reduced stiffness system is solved with LU decomposition; a matrix
/// that cannot be inverted yields [`SolveFailure::Singular`]. Nearly singular
/// systems solve to very large displacements, which the fitness evaluator
/// filters with its sanity bound.
///
/// # Examples
///
/// ```
/// use truss_ga::solver::FrameSolver;
///
/// let solver = FrameSolver::default();
/// assert_eq!(solver.flexural_rigidity(), 5000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSolver {
    axial_rigidity: f64,
    flexural_rigidity: f64,
}

impl Default for FrameSolver {
    fn default() -> Self {
        Self {
            axial_rigidity: 15_000.0,
            flexural_rigidity: 5_000.0,
        }
    }
}

impl FrameSolver {
    /// Creates a solver with the given `EA` and `EI`.
    pub fn new(axial_rigidity: f64, flexural_rigidity: f64) -> Self {
        Self {
            axial_rigidity,
            flexural_rigidity,
        }
    }

    /// Member `EA`.
    pub fn axial_rigidity(&self) -> f64 {
        self.axial_rigidity
    }

    /// Member `EI`.
    pub fn flexural_rigidity(&self) -> f64 {
        self.flexural_rigidity
    }

    /// Global-coordinate stiffness of one member from `(x1, y1)` to `(x2, y2)`.
    fn element_stiffness(&self, dx: f64, dy: f64) -> Option<ElementMatrix> {
        let length = dx.hypot(dy);
        if length <= 0.0 {
            return None;
        }
        let c = dx / length;
        let s = dy / length;

        let ea = self.axial_rigidity / length;
        let ei = self.flexural_rigidity;
        let k1 = 12.0 * ei / length.powi(3);
        let k2 = 6.0 * ei / length.powi(2);
        let k3 = 4.0 * ei / length;
        let k4 = 2.0 * ei / length;

        #[rustfmt::skip]
        let local = ElementMatrix::from_row_slice(&[
             ea,  0.0, 0.0, -ea,  0.0, 0.0,
            0.0,   k1,  k2, 0.0,  -k1,  k2,
            0.0,   k2,  k3, 0.0,  -k2,  k4,
            -ea,  0.0, 0.0,  ea,  0.0, 0.0,
            0.0,  -k1, -k2, 0.0,   k1, -k2,
            0.0,   k2,  k4, 0.0,  -k2,  k3,
        ]);

        #[rustfmt::skip]
        let rotation = ElementMatrix::from_row_slice(&[
              c,   s, 0.0, 0.0, 0.0, 0.0,
             -s,   c, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0,   c,   s, 0.0,
            0.0, 0.0, 0.0,  -s,   c, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]);

        Some(rotation.transpose() * local * rotation)
    }

    fn assemble(&self, structure: &DecodedStructure) -> Result<DMatrix<f64>, SolveFailure> {
        let size = structure.nodes().len() * DOF;
        let mut stiffness = DMatrix::<f64>::zeros(size, size);

        for (idx, element) in structure.elements().iter().enumerate() {
            let (p, q) = structure.element_coordinates(element);
            let k = self
                .element_stiffness(f64::from(q.x - p.x), f64::from(q.y - p.y))
                .ok_or_else(|| SolveFailure::InvalidTopology(format!("element {idx} has zero length")))?;

            let map = [
                element.start * DOF,
                element.start * DOF + 1,
                element.start * DOF + 2,
                element.end * DOF,
                element.end * DOF + 1,
                element.end * DOF + 2,
            ];
            for (row_local, &row) in map.iter().enumerate() {
                for (col_local, &col) in map.iter().enumerate() {
                    stiffness[(row, col)] += k[(row_local, col_local)];
                }
            }
        }
        Ok(stiffness)
    }

    fn load_vector(structure: &DecodedStructure) -> DVector<f64> {
        let mut load = DVector::zeros(structure.nodes().len() * DOF);
        for point_load in structure.loads() {
            load[point_load.node * DOF] += point_load.fx;
            load[point_load.node * DOF + 1] += point_load.fy;
        }
        load
    }

    fn free_dofs(structure: &DecodedStructure) -> Vec<usize> {
        let mut restrained = vec![false; structure.nodes().len() * DOF];
        for support in structure.supports() {
            let base = support.node * DOF;
            match support.kind {
                SupportKind::Hinged => {
                    restrained[base] = true;
                    restrained[base + 1] = true;
                }
                SupportKind::Roller => restrained[base + 1] = true,
            }
        }
        restrained
            .iter()
            .enumerate()
            .filter(|(_, fixed)| !**fixed)
            .map(|(dof, _)| dof)
            .collect()
    }
}

impl StructuralSolver for FrameSolver {
    fn solve(&self, structure: &DecodedStructure) -> SolveOutcome {
        if structure.nodes().is_empty() || structure.elements().is_empty() {
            return Err(SolveFailure::InvalidTopology("structure has no members".into()));
        }

        let stiffness = self.assemble(structure)?;
        let load = Self::load_vector(structure);
        let free = Self::free_dofs(structure);

        let n = free.len();
        let mut k_ff = DMatrix::<f64>::zeros(n, n);
        let mut f_f = DVector::<f64>::zeros(n);
        for (i, &row) in free.iter().enumerate() {
            f_f[i] = load[row];
            for (j, &col) in free.iter().enumerate() {
                k_ff[(i, j)] = stiffness[(row, col)];
            }
        }

        let reduced = k_ff.lu().solve(&f_f).ok_or(SolveFailure::Singular)?;

        let mut full = vec![0.0; structure.nodes().len() * DOF];
        for (i, &dof) in free.iter().enumerate() {
            full[dof] = reduced[i];
        }
        let displacements = full
            .chunks_exact(DOF)
            .map(|d| NodeDisplacement {
                ux: d[0],
                uy: d[1],
                phi: d[2],
            })
            .collect();

        Ok(Solution::new(displacements, self.flexural_rigidity))
    }
}
