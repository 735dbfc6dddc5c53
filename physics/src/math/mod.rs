mod lcp;
mod matrix;
mod vector;

pub use lcp::{
    residual, solve_lcp, LcpOutcome, LcpSolver, LcpStatus, SolveState, Tableau, Variable,
    DEFAULT_MAX_ITER, PIVOT_EPSILON,
};
pub use matrix::MatMN;
pub use vector::VecN;

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .fold(0.0, |dot, (&lhs, &rhs)| dot + lhs * rhs)
}
