//! Estimate command - compare sampled betweenness against exact values

use std::{fmt, str::FromStr, time::Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    network::{Graph, generators},
    utility::{ApproximateBetweenness, betweenness_all},
};

/// Benchmark graph families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFamily {
    Cycle,
    Star,
    Path,
    Complete,
    Random,
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphFamily::Cycle => "cycle",
            GraphFamily::Star => "star",
            GraphFamily::Path => "path",
            GraphFamily::Complete => "complete",
            GraphFamily::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for GraphFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycle" => Ok(GraphFamily::Cycle),
            "star" => Ok(GraphFamily::Star),
            "path" => Ok(GraphFamily::Path),
            "complete" => Ok(GraphFamily::Complete),
            "random" | "gnp" => Ok(GraphFamily::Random),
            other => Err(format!(
                "unknown graph family '{other}' (expected cycle, star, path, complete, random)"
            )),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Compare approximate betweenness with the exact computation")]
pub struct EstimateArgs {
    /// Graph family to benchmark on
    #[arg(long, default_value = "cycle")]
    pub graph: GraphFamily,

    /// Number of nodes
    #[arg(long, short = 'n', default_value_t = 10)]
    pub nodes: usize,

    /// Edge probability for random graphs
    #[arg(long, default_value_t = 0.3)]
    pub edge_probability: f64,

    /// Additive error bound
    #[arg(long, default_value_t = 0.05)]
    pub epsilon: f64,

    /// Failure probability
    #[arg(long, default_value_t = 0.05)]
    pub delta: f64,

    /// Independent estimator runs
    #[arg(long, default_value_t = 100)]
    pub runs: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample paths on rayon tasks
    #[arg(long)]
    pub parallel: bool,
}

/// Per-run error statistics against the exact values.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateReport {
    pub runs: usize,
    /// Fraction of runs whose every node was within epsilon.
    pub within_epsilon: f64,
    pub max_error: f64,
    pub mean_error: f64,
}

pub fn build_graph(family: GraphFamily, nodes: usize, p: f64, rng: &mut StdRng) -> Result<Graph> {
    let graph = match family {
        GraphFamily::Cycle => generators::cycle(nodes)?,
        GraphFamily::Star => generators::star(nodes)?,
        GraphFamily::Path => generators::path(nodes)?,
        GraphFamily::Complete => generators::complete(nodes)?,
        GraphFamily::Random => generators::gnp(nodes, p, rng)?,
    };
    Ok(graph)
}

/// Run the estimator `runs` times and measure the worst node error of
/// each run.
pub fn compare(
    estimator: &ApproximateBetweenness,
    graph: &Graph,
    runs: usize,
    parallel: bool,
    rng: &mut StdRng,
) -> EstimateReport {
    let exact = betweenness_all(graph);
    let errors: Vec<f64> = (0..runs)
        .map(|_| {
            let estimates = if parallel {
                estimator.estimate_normalized_parallel(graph, rng)
            } else {
                estimator.estimate_normalized(graph, rng)
            };
            estimates
                .iter()
                .zip(&exact)
                .map(|(e, x)| (e - x).abs())
                .fold(0.0, f64::max)
        })
        .collect();

    let within = errors.iter().filter(|&&e| e <= estimator.epsilon).count();
    let denominator = runs.max(1) as f64;
    EstimateReport {
        runs,
        within_epsilon: within as f64 / denominator,
        max_error: errors.iter().copied().fold(0.0, f64::max),
        mean_error: errors.iter().sum::<f64>() / denominator,
    }
}

pub fn execute(args: EstimateArgs) -> Result<()> {
    if args.runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }
    let estimator = ApproximateBetweenness::new(args.epsilon, args.delta)?;
    let mut rng = StdRng::seed_from_u64(args.seed.unwrap_or_else(rand::random));
    let graph = build_graph(args.graph, args.nodes, args.edge_probability, &mut rng)?;

    let diameter = ApproximateBetweenness::vertex_diameter(&graph, &mut rng);
    print_section("Approximate Betweenness");
    print_kv("Graph", &format!("{} ({} nodes)", args.graph, graph.node_count()));
    print_kv("Edges", &graph.edge_count().to_string());
    print_kv("Epsilon", &args.epsilon.to_string());
    print_kv("Delta", &args.delta.to_string());
    print_kv("Vertex diameter", &diameter.to_string());
    print_kv(
        "Samples per run",
        &format_number(estimator.sample_size(diameter)),
    );

    let spinner = create_spinner(&format!("Running {} estimates...", args.runs))?;
    let start = Instant::now();
    let report = compare(&estimator, &graph, args.runs, args.parallel, &mut rng);
    spinner.finish_and_clear();

    print_subsection("Accuracy");
    print_kv("Runs", &format_number(report.runs));
    print_kv(
        "Within epsilon",
        &format!("{:.1}%", report.within_epsilon * 100.0),
    );
    print_kv("Target", &format!("{:.1}%", (1.0 - args.delta) * 100.0));
    print_kv("Max error", &format!("{:.4}", report.max_error));
    print_kv("Mean error", &format!("{:.4}", report.mean_error));
    print_kv("Elapsed", &format!("{:.2?}", start.elapsed()));

    Ok(())
}
