use crate::{
    error::{DimensionError, ProblemError},
    math::{LcpSolver, MatMN, VecN, DEFAULT_MAX_ITER},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// A serializable `(M, q)` pair with its iteration cap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LcpProblem {
    pub m: Vec<Vec<f64>>,
    pub q: Vec<f64>,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

impl LcpProblem {
    pub fn new(m: Vec<Vec<f64>>, q: Vec<f64>) -> Self {
        Self {
            m,
            q,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// `M = AᵀA + I` with `A` and `q` drawn uniformly from `[-1, 1]`. Always has a solution.
    pub fn random_psd<R: Rng>(rng: &mut R, n: usize) -> Self {
        let mut a = MatMN::zero(n, n);
        for r in 0..n {
            for value in a.row_mut(r) {
                *value = rng.gen_range(-1.0..=1.0);
            }
        }
        let mut m = &a.transpose() * &a;
        for i in 0..n {
            m[(i, i)] += 1.0;
        }
        let q = (0..n).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        Self::new((0..n).map(|r| m.row(r).to_vec()).collect(), q)
    }

    /// The cases run by the demo driver: an already feasible `q` and a two pivot solve.
    pub fn demo_cases() -> Vec<LcpProblem> {
        vec![
            LcpProblem::new(
                vec![
                    vec![1.0, 0.0, 0.0],
                    vec![2.0, 3.0, 0.0],
                    vec![4.0, 5.0, 6.0],
                ],
                vec![9.0, 8.0, 7.0],
            ),
            LcpProblem::new(vec![vec![2.0, 1.0], vec![0.0, 2.0]], vec![-1.0, -2.0]),
        ]
    }

    pub fn matrix(&self) -> Result<MatMN, DimensionError> {
        MatMN::from_rows(&self.m)
    }

    pub fn solver(&self) -> Result<LcpSolver, DimensionError> {
        LcpSolver::with_max_iter(&self.matrix()?, &VecN::from(self.q.as_slice()), self.max_iter)
    }
}

pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<LcpProblem, ProblemError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let problem = serde_json::from_reader(reader).map_err(|source| ProblemError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(problem)
}

pub fn save_problem<P: AsRef<Path>>(path: P, problem: &LcpProblem) -> Result<(), ProblemError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, problem).map_err(|source| ProblemError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::LcpStatus;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_json_defaults() {
        let problem: LcpProblem = serde_json::from_str(r#"{"m": [[2, 1], [0, 2]], "q": [-1, -2]}"#)
            .unwrap();
        assert_eq!(problem.max_iter, DEFAULT_MAX_ITER);
        assert_eq!(problem, LcpProblem::demo_cases()[1]);
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("lcp_problem_{}.json", std::process::id()));
        let mut problem = LcpProblem::demo_cases().remove(0);
        problem.max_iter = 7;
        save_problem(&path, &problem).unwrap();
        let loaded = load_problem(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, problem);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_problem("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ProblemError::Io { .. }));
    }

    #[test]
    fn test_solver_dimension_error() {
        let problem = LcpProblem::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![1.0]);
        assert_eq!(
            problem.solver().unwrap_err(),
            DimensionError::LengthMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_random_psd() {
        let mut rng = Pcg64::seed_from_u64(7);
        let problem = LcpProblem::random_psd(&mut rng, 4);
        let m = problem.matrix().unwrap();
        assert!(m.is_square());
        assert_eq!(m, m.transpose());
        for i in 0..4 {
            assert!(m[(i, i)] >= 1.0);
        }
        let outcome = problem.solver().unwrap().solve();
        assert_eq!(outcome.status, LcpStatus::SolutionFound);
    }
}
