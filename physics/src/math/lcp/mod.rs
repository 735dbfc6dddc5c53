//! Lemke's complementary pivoting method for the linear complementarity problem.
//!
//! Given `M` and `q`, finds `z >= 0` with `w = Mz + q >= 0` and `z . w = 0`. The solver works on
//! small dense systems; degenerate and cycling problems are reported through [`LcpStatus`] rather
//! than resolved.

mod tableau;
mod variable;

pub use tableau::Tableau;
pub use variable::Variable;

use super::{MatMN, VecN};
use crate::error::DimensionResult;
use core::fmt;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ITER: usize = 100;

/// Offset added to the pivot before dividing in [`Tableau::clear_driver_column`]. This is a
/// heuristic guard against an exactly zero pivot and depends on the problem's scaling.
pub const PIVOT_EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveState {
    NotStarted,
    Initialized,
    Pivoting,
    SolutionFound,
    SecondaryRay,
    MaxIterations,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LcpStatus {
    SolutionFound,
    /// A secondary ray was hit but the tableau already held a feasible basis.
    SecondaryRaySolution,
    SecondaryRay,
    MaxIterations,
}

impl LcpStatus {
    pub fn code(self) -> u32 {
        match self {
            LcpStatus::SolutionFound | LcpStatus::SecondaryRaySolution => 0,
            LcpStatus::SecondaryRay => 1,
            LcpStatus::MaxIterations => 2,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LcpStatus::SolutionFound => "Solution Found",
            LcpStatus::SecondaryRaySolution => "Secondary ray Solution",
            LcpStatus::SecondaryRay => "Secondary ray found",
            LcpStatus::MaxIterations => "Max Iterations Exceeded",
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        self.code() == 0
    }
}

impl fmt::Display for LcpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LcpOutcome {
    /// `z`, present only when `status` is a success.
    pub solution: Option<VecN>,
    pub status: LcpStatus,
    /// Ratio-test steps taken after initialization.
    pub steps: usize,
}

impl LcpOutcome {
    /// `(solution, status code, message)`.
    pub fn into_tuple(self) -> (Option<VecN>, u32, &'static str) {
        (self.solution, self.status.code(), self.status.message())
    }
}

#[derive(Clone, Debug)]
pub struct LcpSolver {
    tableau: Tableau,
    max_iter: usize,
    state: SolveState,
    outcome: Option<LcpOutcome>,
}

impl LcpSolver {
    pub fn new(m: &MatMN, q: &VecN) -> DimensionResult<Self> {
        Self::with_max_iter(m, q, DEFAULT_MAX_ITER)
    }

    pub fn with_max_iter(m: &MatMN, q: &VecN, max_iter: usize) -> DimensionResult<Self> {
        Ok(Self {
            tableau: Tableau::new(m, q)?,
            max_iter,
            state: SolveState::NotStarted,
            outcome: None,
        })
    }

    #[inline]
    pub fn state(&self) -> SolveState {
        self.state
    }

    #[inline]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[inline]
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Runs the pivoting loop to completion. Once terminated, later calls return the same outcome.
    pub fn solve(&mut self) -> LcpOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let n = self.tableau.size();
        debug!(n, max_iter = self.max_iter, "solving lcp");

        if !self.initialize() {
            return self.finish(
                SolveState::SolutionFound,
                LcpStatus::SolutionFound,
                Some(VecN::zero(n)),
                0,
            );
        }
        self.state = SolveState::Initialized;

        let driving_col = self.tableau.driving_col();
        for k in 0..self.max_iter {
            self.state = SolveState::Pivoting;
            let stepped = self.step();
            let steps = k + 1;

            if self.tableau.variable_at(driving_col) == Variable::Y {
                let z = self.tableau.extract_solution();
                return self.finish(
                    SolveState::SolutionFound,
                    LcpStatus::SolutionFound,
                    Some(z),
                    steps,
                );
            } else if !stepped {
                warn!(steps, "secondary ray");
                if !self.initialize() {
                    let z = self.tableau.extract_solution();
                    return self.finish(
                        SolveState::SecondaryRay,
                        LcpStatus::SecondaryRaySolution,
                        Some(z),
                        steps,
                    );
                }
                return self.finish(
                    SolveState::SecondaryRay,
                    LcpStatus::SecondaryRay,
                    None,
                    steps,
                );
            }
        }

        warn!(max_iter = self.max_iter, "iteration limit reached");
        let steps = self.max_iter;
        self.finish(
            SolveState::MaxIterations,
            LcpStatus::MaxIterations,
            None,
            steps,
        )
    }

    fn finish(
        &mut self,
        state: SolveState,
        status: LcpStatus,
        solution: Option<VecN>,
        steps: usize,
    ) -> LcpOutcome {
        debug!(%status, steps, "lcp solve finished");
        let outcome = LcpOutcome {
            solution,
            status,
            steps,
        };
        self.state = state;
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Pivots `y` into the row with the most negative constant. Returns `false` without touching
    /// the tableau if every constant is already non-negative.
    fn initialize(&mut self) -> bool {
        let mut min_row = None;
        let mut min_q = 0.0;
        for row in 0..self.tableau.size() {
            let q = self.tableau.constant(row);
            if q < min_q {
                min_row = Some(row);
                min_q = q;
            }
        }

        match min_row {
            Some(row) => {
                self.tableau.clear_driver_column(row);
                self.tableau.pivot(row);
                true
            }
            None => false,
        }
    }

    /// Minimum ratio test over rows with a positive driving entry, first row winning ties.
    /// Returns `false` on ray termination, when no such row exists.
    fn step(&mut self) -> bool {
        let mut pivot_row = None;
        let mut min_ratio = f64::INFINITY;
        for row in 0..self.tableau.size() {
            let a = self.tableau.driving(row);
            if a > 0.0 {
                let ratio = self.tableau.constant(row) / a;
                if ratio < min_ratio {
                    pivot_row = Some(row);
                    min_ratio = ratio;
                }
            }
        }

        match pivot_row {
            Some(row) => {
                self.tableau.clear_driver_column(row);
                self.tableau.pivot(row);
                true
            }
            None => false,
        }
    }
}

/// Solves `(M, q)` with an iteration cap of `max_iter`.
pub fn solve_lcp(m: &MatMN, q: &VecN, max_iter: usize) -> DimensionResult<LcpOutcome> {
    Ok(LcpSolver::with_max_iter(m, q, max_iter)?.solve())
}

/// `w = Mz + q`.
pub fn residual(m: &MatMN, z: &VecN, q: &VecN) -> VecN {
    (m * z) + q
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn solve(m: &[&[f64]], q: &[f64], max_iter: usize) -> LcpOutcome {
        let m = MatMN::from_rows(m).unwrap();
        solve_lcp(&m, &VecN::from(q), max_iter).unwrap()
    }

    #[test]
    fn test_trivial_solution() {
        let outcome = solve(
            &[&[1., 0., 0.], &[2., 3., 0.], &[4., 5., 6.]],
            &[9., 8., 7.],
            DEFAULT_MAX_ITER,
        );
        assert_eq!(outcome.steps, 0);
        assert_eq!(
            outcome.into_tuple(),
            (Some(VecN::zero(3)), 0, "Solution Found")
        );
    }

    #[test]
    fn test_two_pivot_solution() {
        let outcome = solve(&[&[2., 1.], &[0., 2.]], &[-1., -2.], DEFAULT_MAX_ITER);
        assert_eq!(outcome.status, LcpStatus::SolutionFound);
        assert_eq!(outcome.steps, 2);
        let z = outcome.solution.unwrap();
        assert_abs_diff_eq!(z[0], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(z[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_diagonal_solution() {
        let outcome = solve(
            &[&[2., 0., 0.], &[0., 2., 0.], &[0., 0., 2.]],
            &[-2., 1., -4.],
            DEFAULT_MAX_ITER,
        );
        assert_eq!(outcome.status, LcpStatus::SolutionFound);
        let z = outcome.solution.unwrap();
        assert_abs_diff_eq!(z[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(z[1], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(z[2], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_secondary_ray_solution() {
        // w = q - z can't be made non-negative, the ray leaves a feasible-looking basis behind
        let outcome = solve(&[&[-1., 0.], &[0., -1.]], &[-1., -2.], DEFAULT_MAX_ITER);
        assert_eq!(outcome.steps, 1);
        assert_eq!(
            outcome.into_tuple(),
            (Some(VecN::zero(2)), 0, "Secondary ray Solution")
        );
    }

    #[test]
    fn test_secondary_ray() {
        let m = MatMN::from_rows(&[[-1e300, -1., -1.], [-1e300, 0., -2.], [0., 2., 1.]]).unwrap();
        let q = VecN::from(vec![1., 1., -2.]);
        let mut solver = LcpSolver::new(&m, &q).unwrap();
        let outcome = solver.solve();
        assert_eq!(solver.state(), SolveState::SecondaryRay);
        assert_eq!(outcome.steps, 6);
        assert_eq!(outcome.into_tuple(), (None, 1, "Secondary ray found"));
    }

    #[test]
    fn test_max_iterations() {
        let m = MatMN::from_rows(&[[2., 1.], [0., 2.]]).unwrap();
        let q = VecN::from(vec![-1., -2.]);
        let mut solver = LcpSolver::with_max_iter(&m, &q, 0).unwrap();
        let outcome = solver.solve();
        assert_eq!(solver.state(), SolveState::MaxIterations);
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.into_tuple(), (None, 2, "Max Iterations Exceeded"));

        let outcome = solve(&[&[2., 1.], &[1., 2.]], &[-5., -6.], 1);
        assert_eq!(outcome.status, LcpStatus::MaxIterations);
        assert_eq!(outcome.steps, 1);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let m = MatMN::from_rows(&[[2., 1.], [1., 2.]]).unwrap();
        let q = VecN::from(vec![-5., -6.]);
        let mut solver = LcpSolver::new(&m, &q).unwrap();
        assert_eq!(solver.state(), SolveState::NotStarted);
        let first = solver.solve();
        assert_eq!(solver.state(), SolveState::SolutionFound);
        let tableau = solver.tableau().to_string();
        assert_eq!(solver.solve(), first);
        assert_eq!(solver.tableau().to_string(), tableau);

        let z = first.solution.unwrap();
        assert_abs_diff_eq!(z[0], 4.0 / 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(z[1], 7.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_problem() {
        let outcome = solve_lcp(&MatMN::zero(0, 0), &VecN::zero(0), DEFAULT_MAX_ITER).unwrap();
        assert_eq!(outcome.status, LcpStatus::SolutionFound);
        assert_eq!(outcome.solution, Some(VecN::zero(0)));
    }

    #[test]
    fn test_residual() {
        let m = MatMN::from_rows(&[[2., 1.], [0., 2.]]).unwrap();
        let w = residual(&m, &VecN::from(vec![0., 1.]), &VecN::from(vec![-1., -2.]));
        assert_eq!(w, VecN::zero(2));
    }

    #[test]
    fn test_status_codes() {
        assert!(LcpStatus::SecondaryRaySolution.is_success());
        assert!(!LcpStatus::SecondaryRay.is_success());
        assert_eq!(LcpStatus::MaxIterations.to_string(), "Max Iterations Exceeded");
    }
}
