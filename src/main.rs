use anyhow::{Context, Result};
use clap::Parser;
use lcp_physics::{
    math::{residual, LcpOutcome, VecN},
    problem::{load_problem, save_problem, LcpProblem},
};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solve linear complementarity problems with Lemke's method.
///
/// Without a problem file or `--random`, runs the built-in demo cases.
#[derive(Parser)]
#[command(name = "lemke-contact")]
#[command(version)]
struct Cli {
    /// JSON problem file: {"m": [[..]], "q": [..], "max_iter": 100}
    problem: Option<PathBuf>,

    /// Solve a random positive definite problem of this size
    #[arg(long, conflicts_with = "problem")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override the iteration cap
    #[arg(long)]
    max_iter: Option<usize>,

    /// Write the problem being solved to this path
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the final tableau
    #[arg(long)]
    tableau: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut problems = if let Some(path) = &cli.problem {
        vec![load_problem(path)?]
    } else if let Some(n) = cli.random {
        let mut rng = Pcg64::seed_from_u64(cli.seed);
        vec![LcpProblem::random_psd(&mut rng, n)]
    } else {
        LcpProblem::demo_cases()
    };

    if let Some(max_iter) = cli.max_iter {
        for problem in &mut problems {
            problem.max_iter = max_iter;
        }
    }

    if let Some(path) = &cli.save {
        for (i, problem) in problems.iter().enumerate() {
            let target = if problems.len() == 1 {
                path.clone()
            } else {
                numbered_path(path, i + 1)
            };
            save_problem(&target, problem)?;
            info!(path = %target.display(), "saved problem");
        }
    }

    for (i, problem) in problems.iter().enumerate() {
        let mut solver = problem
            .solver()
            .with_context(|| format!("case #{} is malformed", i + 1))?;

        let start = Instant::now();
        let outcome = solver.solve();
        let elapsed = start.elapsed();

        println!("Case # {}", i + 1);
        println!("\tTime spent: {:.7}s", elapsed.as_secs_f64());
        report(problem, &outcome)?;
        if cli.tableau {
            print!("{}", solver.tableau());
        }
    }

    Ok(())
}

fn report(problem: &LcpProblem, outcome: &LcpOutcome) -> Result<()> {
    println!(
        "\tstatus {} ({}) after {} steps",
        outcome.status.code(),
        outcome.status,
        outcome.steps
    );
    if let Some(z) = &outcome.solution {
        let w = residual(&problem.matrix()?, z, &VecN::from(problem.q.as_slice()));
        println!("\tz = {:?}", &z[..]);
        println!("\tw = {:?}", &w[..]);
    }
    Ok(())
}

/// `cases.json` -> `cases_2.json`
fn numbered_path(path: &Path, number: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "problem".into(), |stem| stem.to_string_lossy());
    path.with_file_name(format!("{}_{}.json", stem, number))
}
