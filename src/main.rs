use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use swing::config::{ScenarioKind, SimulationConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step RK4 simulation of particles and pendula")]
struct Args {
    /// RON scenario file; takes precedence over --scenario
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stock scenario to run when no config file is given
    #[arg(short, long, value_enum, default_value = "pendulum")]
    scenario: ScenarioKind,

    /// Write the trajectory here as RON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::preset(args.scenario),
    };

    tracing::info!(name = %config.name, kind = ?config.scenario.kind(), "loaded scenario");
    let trajectory = config
        .run()
        .with_context(|| format!("simulation `{}` failed", config.name))?;

    if let Some((t, positions)) = trajectory.len().checked_sub(1).and_then(|i| trajectory.sample(i)) {
        tracing::info!(samples = trajectory.len(), t_end = t, last = ?positions, "trajectory ready");
    }

    if let Some(path) = &args.output {
        let text = ron::ser::to_string_pretty(&trajectory, ron::ser::PrettyConfig::default())
            .context("failed to serialize trajectory")?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "trajectory written");
    }

    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
