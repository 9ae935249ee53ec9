//! Rigid body planning with controls
//!
//! Drives a unicycle through the [-1, 1]^2 box from (-0.5, 0, 0) to
//! (0, 0.5, 0) and prints the waypoints of the solution if one is found
//! within the time budget.
//!
//! Usage:
//!   cargo run --bin rigid_body_planning_with_controls
//!   cargo run --bin rigid_body_planning_with_controls -- --config config/rigid_body_planning.toml --plot tree.png

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rigid_body_controls::utils::{colors, PathStyle, Visualizer};
use rigid_body_controls::{PlanningResult, ProblemConfig, SimpleSetup};

#[derive(Parser, Debug)]
#[command(about = "Kinodynamic planning for a planar rigid body")]
struct Args {
    /// Problem configuration file (TOML); the built-in problem is used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Solve time budget in seconds, overriding the configuration
    #[arg(short, long)]
    time: Option<f64>,

    /// Planner RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Save the search tree and solution to this PNG file
    #[arg(long)]
    plot: Option<String>,
}

fn main() {
    // Logs go to stderr; stdout carries only the solution
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rigid_body_controls=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = plan(&args) {
        error!("{}", e);
    }
}

fn plan(args: &Args) -> PlanningResult<()> {
    let mut config = match &args.config {
        Some(path) => ProblemConfig::load(path)?,
        None => ProblemConfig::default(),
    };
    if args.seed.is_some() {
        config.planner.seed = args.seed;
    }
    let time_budget = args.time.unwrap_or(config.problem.time_budget);

    let mut ss = config.build_setup()?;
    ss.solve(time_budget)?;

    if let Some(report) = ss.exact_solution_report() {
        print!("{}", report);
    }

    if let Some(file) = &args.plot {
        save_plot(&ss, file)?;
    }
    Ok(())
}

fn save_plot(ss: &SimpleSetup, file: &str) -> PlanningResult<()> {
    let si = ss.space_information();
    let mut vis = Visualizer::new();
    vis.set_title("Rigid body planning with controls");
    vis.plot_bounds(si.state_space().bounds());
    vis.plot_tree(&ss.planner().tree());

    if let Some(path) = ss.solution_path() {
        vis.plot_path(&path.as_geometric().to_path2d(), &PathStyle::new(colors::PATH, "Solution"));
    }
    if let Some(start) = ss.start() {
        vis.plot_start(start);
    }
    if let Some(goal) = ss.goal() {
        vis.plot_goal(&goal.state);
    }
    vis.save_png(file, 800, 800)
}
