//! marlgrid CLI
//!
//! Command-line interface for running marlgrid scenarios with a random policy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use marlgrid::env::{Action, EpisodeStats, MultiAgentEnv};
use marlgrid::log::{ConsoleLogger, MetricLogger};
use marlgrid::spaces::DynSpace;
use marlgrid_envs::SCENARIOS;

#[derive(Parser)]
#[command(name = "marlgrid")]
#[command(version, about = "marlgrid - multi-agent gridworlds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scenarios
    List,

    /// Run one episode with random actions and print the grid
    Demo {
        /// Scenario name
        #[arg(default_value = "social_rejection")]
        env: String,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of steps to show
        #[arg(long, default_value = "10")]
        steps: usize,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Evaluate a random policy
    Eval {
        /// Scenario name
        #[arg(default_value = "social_rejection")]
        env: String,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of episodes
        #[arg(long, default_value = "10")]
        episodes: usize,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list_envs(),
        Commands::Demo {
            env,
            config,
            steps,
            seed,
        } => demo(&env, config, steps, seed)?,
        Commands::Eval {
            env,
            config,
            episodes,
            seed,
        } => eval(&env, config, episodes, seed)?,
    }

    Ok(())
}

fn list_envs() {
    println!("Available environments:");
    for name in SCENARIOS {
        println!("  - {}", name);
    }
}

fn make_env(name: &str, config: Option<PathBuf>) -> Result<Box<dyn MultiAgentEnv>> {
    let json = config
        .map(|path| {
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))
        })
        .transpose()?;
    marlgrid_envs::make(name, json.as_deref()).with_context(|| format!("creating `{name}`"))
}

fn random_actions(env: &dyn MultiAgentEnv, rng: &mut StdRng) -> Vec<Action> {
    let space = env.action_space();
    (0..env.num_agents()).map(|_| space.sample(rng)).collect()
}

/// Human-readable action: discrete choices by label, dict actions field by field
fn describe_action(space: &DynSpace, action: &Action) -> String {
    match (space, action) {
        (DynSpace::Discrete(choices), Action::Discrete(i)) => choices.describe(*i),
        (DynSpace::Dict(fields), Action::Dict(parts)) => {
            let body: Vec<String> = parts
                .iter()
                .map(|(key, part)| match fields.get(key) {
                    Some(sub) => format!("{key}: {}", describe_action(sub, part)),
                    None => format!("{key}: {part:?}"),
                })
                .collect();
            format!("{{{}}}", body.join(", "))
        }
        (_, Action::Text(text)) => format!("{text:?}"),
        (_, other) => format!("{other:?}"),
    }
}

fn demo(name: &str, config: Option<PathBuf>, steps: usize, seed: u64) -> Result<()> {
    let mut env = make_env(name, config)?;
    let mut rng = StdRng::seed_from_u64(seed);

    env.reset(Some(seed))?;
    tracing::info!(env = name, agents = env.num_agents(), "Starting demo");
    if let Some(frame) = env.render() {
        println!("{}\n", frame);
    }

    for step in 0..steps {
        let actions = random_actions(&*env, &mut rng);
        let space = env.action_space();
        let names: Vec<String> = actions.iter().map(|a| describe_action(&space, a)).collect();
        println!("actions: [{}]", names.join(", "));
        let result = env.step(&actions)?;
        if let Some(frame) = env.render() {
            println!("step {}\n{}\n", step + 1, frame);
        }
        if let Some(rewards) = &result.rewards {
            println!("rewards: {:?}", rewards);
        }
        if result.done {
            break;
        }
    }

    env.close()?;
    Ok(())
}

fn eval(name: &str, config: Option<PathBuf>, episodes: usize, seed: u64) -> Result<()> {
    tracing::info!(env = name, episodes, "Starting evaluation (random policy)");

    let mut env = EpisodeStats::new(make_env(name, config)?);
    let mut rng = StdRng::seed_from_u64(seed);
    let logger = ConsoleLogger::new();
    let mut total_return = 0.0;

    for ep in 0..episodes {
        env.reset(Some(seed + ep as u64))?;
        loop {
            let actions = random_actions(&**env.inner(), &mut rng);
            let result = env.step(&actions)?;
            if !result.done {
                continue;
            }

            let mut metrics = BTreeMap::new();
            let ret = result.info.get("episode_return").unwrap_or(0.0);
            metrics.insert("mean_return".to_string(), ret as f64);
            metrics.insert(
                "length".to_string(),
                result.info.get("episode_length").unwrap_or(0.0) as f64,
            );
            if let Some(survivors) = result.info.get("survivors") {
                metrics.insert("survivors".to_string(), survivors as f64);
            }
            logger.log_metrics(&metrics, ep as u64);
            total_return += ret;
            break;
        }
    }

    env.close()?;
    logger.close();
    let avg_return = if episodes > 0 {
        total_return / episodes as f32
    } else {
        0.0
    };
    tracing::info!(avg_return, "Evaluation complete");
    Ok(())
}
