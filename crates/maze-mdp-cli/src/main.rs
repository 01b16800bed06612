// maze-mdp
// Solve grid-world mazes with value iteration or policy iteration

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use maze_mdp_core::{Algorithm, SolverConfig};
use maze_mdp_env::{
    preset, random_maze, record_file_name, render_report, result_file_name, Grid, GridWorld,
    MazeSpec, RewardMapping, SolutionRecord,
};

mod config;

use config::FileConfig;

#[derive(Debug, Parser)]
#[command(name = "maze-mdp")]
#[command(about = "Solve grid-world mazes with value or policy iteration", version)]
struct Cli {
    /// Algorithm: 1 / vi for value iteration, 2 / pi for policy iteration
    #[arg(long)]
    algo: Option<Algorithm>,

    /// Discount factor for future utility, γ
    #[arg(long, alias = "discount_gamma")]
    discount_gamma: Option<f64>,

    /// Maximum error allowed in the utility of any state, ε
    #[arg(long, alias = "max_error")]
    max_error: Option<f64>,

    /// Policy evaluation sweeps per loop, k
    #[arg(long, alias = "num_pe")]
    num_pe: Option<usize>,

    /// Prefix of the result files (defaults to the algorithm name)
    #[arg(long, alias = "save_filename_prefix")]
    save_filename_prefix: Option<String>,

    /// Directory where results are stored
    #[arg(long)]
    datadir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Named maze layout (default, aima, ...)
    #[arg(long, conflicts_with = "gen_maze")]
    preset: Option<String>,

    /// Solve a randomly generated square maze
    #[arg(long, alias = "gen_maze")]
    gen_maze: bool,

    /// Number of green cells in the generated maze
    #[arg(long, alias = "num_g_states")]
    num_g_states: Option<usize>,

    /// Number of brown cells in the generated maze
    #[arg(long, alias = "num_b_states")]
    num_b_states: Option<usize>,

    /// Number of wall cells in the generated maze
    #[arg(long, alias = "num_w_states")]
    num_w_states: Option<usize>,

    /// Side length of the generated maze
    #[arg(long, alias = "maze_width")]
    maze_width: Option<usize>,

    /// Seed for maze generation
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the solution as JSON
    #[arg(long)]
    json: bool,
}

/// Everything a run needs, after merging flags, config file and defaults
#[derive(Debug)]
struct Settings {
    algorithm: Algorithm,
    solver: SolverConfig,
    rewards: RewardMapping,
    grid: Grid,
    datadir: PathBuf,
    prefix: String,
    json: bool,
}

impl Settings {
    /// Flags win over the config file, which wins over the defaults
    fn resolve(cli: &Cli, file: &FileConfig) -> Result<Self> {
        let algorithm = cli
            .algo
            .or(file.algorithm)
            .unwrap_or(Algorithm::ValueIteration);

        let defaults = SolverConfig::default();
        let solver = SolverConfig {
            discount: cli
                .discount_gamma
                .or(file.solver.discount)
                .unwrap_or(defaults.discount),
            max_error: cli
                .max_error
                .or(file.solver.max_error)
                .unwrap_or(defaults.max_error),
            num_policy_evaluation: cli
                .num_pe
                .or(file.solver.num_policy_evaluation)
                .unwrap_or(defaults.num_policy_evaluation),
        };
        solver.validate()?;

        let prefix = cli
            .save_filename_prefix
            .clone()
            .or_else(|| file.output.save_filename_prefix.clone())
            .unwrap_or_else(|| algorithm.slug().to_string());
        let datadir = cli
            .datadir
            .clone()
            .or_else(|| file.output.datadir.clone())
            .unwrap_or_else(|| PathBuf::from("results"));

        Ok(Self {
            algorithm,
            solver,
            rewards: file.rewards.unwrap_or_default(),
            grid: select_grid(cli, file)?,
            datadir,
            prefix,
            json: cli.json || file.output.json.unwrap_or(false),
        })
    }
}

fn select_grid(cli: &Cli, file: &FileConfig) -> Result<Grid> {
    if cli.gen_maze {
        let base = file.maze.generate.unwrap_or_default();
        let spec = MazeSpec {
            num_green: cli.num_g_states.unwrap_or(base.num_green),
            num_brown: cli.num_b_states.unwrap_or(base.num_brown),
            num_wall: cli.num_w_states.unwrap_or(base.num_wall),
            width: cli.maze_width.unwrap_or(base.width),
        };
        let mut rng = match cli.seed.or(file.maze.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(?spec, "generating maze");
        return random_maze(&spec, &mut rng).context("Failed to generate maze");
    }

    if let Some(name) = &cli.preset {
        return Ok(preset(name)?);
    }
    if let Some(rows) = &file.maze.rows {
        return Grid::from_rows(rows).context("Invalid maze in config file");
    }
    Ok(preset(file.maze.preset.as_deref().unwrap_or("default"))?)
}

fn run(settings: &Settings) -> Result<()> {
    fs::create_dir_all(&settings.datadir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            settings.datadir.display()
        )
    })?;

    let world = GridWorld::new(settings.grid.clone(), settings.rewards)?;
    let config = &settings.solver;

    println!("MDP : {}", settings.algorithm);
    println!(
        "γ : {}, ε : {}, k : {}, fn_prefix : {}, datadir : {}",
        config.discount,
        config.max_error,
        config.num_policy_evaluation,
        settings.prefix,
        settings.datadir.display()
    );
    println!("\n--- Solving MDP with the following maze ---");
    print!("{}", settings.grid);

    let solution = settings.algorithm.solve(config, &world)?;
    let report = render_report(&world, &solution);
    println!("\n{report}");

    let report_path = settings
        .datadir
        .join(result_file_name(&settings.prefix, settings.algorithm, config));
    fs::write(&report_path, &report)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    info!(path = %report_path.display(), "report written");

    if settings.json {
        let record_path = settings
            .datadir
            .join(record_file_name(&settings.prefix, settings.algorithm, config));
        SolutionRecord::new(settings.algorithm, config.clone(), &world, &solution)
            .write_to(&record_path)?;
    }

    #[cfg(feature = "visualization")]
    {
        let plot_path = settings.datadir.join(maze_mdp_env::plot_file_name(
            &settings.prefix,
            settings.algorithm,
            config,
        ));
        maze_mdp_env::plot_utility_vs_iteration(&solution.iteration_utilities, &plot_path)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, &file)?;
    run(&settings)
}
