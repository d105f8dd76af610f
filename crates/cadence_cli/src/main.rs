//! Cadence CLI
//!
//! Plan and play demo animation timelines in the terminal.

mod demos;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use cadence_runtime::{EventLoop, SequenceConfig, Stage};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use demos::{Demo, Reporter};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(author, version, about = "Plan and play animation timelines", long_about = None)]
struct Cli {
    /// Enable verbose output (debug logs and per-step timeline events)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Sequence config file providing timeline defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a demo timeline in real time
    Run {
        #[arg(value_enum)]
        demo: Demo,
    },

    /// Print a demo's computed schedule without running it
    Plan {
        #[arg(value_enum)]
        demo: Demo,
    },

    /// Print the effective sequence config as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => Some(
            SequenceConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
        ),
        None => None,
    };

    match cli.command {
        Commands::Run { demo } => cmd_run(demo, config.as_ref(), cli.verbose),
        Commands::Plan { demo } => cmd_plan(demo, config.as_ref()),
        Commands::Config => cmd_config(config),
    }
}

fn cmd_run(demo: Demo, config: Option<&SequenceConfig>, verbose: bool) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to start event loop")?;
    let stage = Rc::new(Stage::new());
    let reporter = Reporter::new(stage.clone());

    let mut timeline = demo.build(&stage, &reporter, config)?;
    if verbose {
        timeline.set_verbose();
    }
    let schedule = timeline.plan();

    let done = reporter.clone();
    timeline.on_finish(move || done.note("sequence finished"));

    tracing::info!(?demo, steps = timeline.len(), finish_at = schedule.finish_at(), "playing");
    timeline.run(&event_loop, stage.clone());
    event_loop.run();

    // Let async tweens that outlive the sequence settle before reporting.
    reporter.sync();
    stage.tick(schedule.total_duration() + 1.0);

    println!();
    for (name, value) in stage.snapshot() {
        println!("  {name:<14} {value:>9.2}");
    }
    Ok(())
}

fn cmd_plan(demo: Demo, config: Option<&SequenceConfig>) -> Result<()> {
    let stage = Rc::new(Stage::new());
    let reporter = Reporter::new(stage.clone());
    let timeline = demo.build(&stage, &reporter, config)?;
    let schedule = timeline.plan();

    println!("{:<4} {:<10} {:>8} {:>9}  {}", "#", "label", "at", "duration", "mode");
    for (slot, step) in schedule.steps().iter().zip(timeline.steps()) {
        println!(
            "{:<4} {:<10} {:>7.3}s {:>8.3}s  {} {}",
            slot.index,
            slot.label,
            slot.at,
            slot.duration,
            if slot.is_async { "async" } else { "sync " },
            step.easing()
        );
    }
    println!();
    println!("finish at   {:>7.3}s", schedule.finish_at());
    println!("total       {:>7.3}s", schedule.total_duration());
    Ok(())
}

fn cmd_config(config: Option<SequenceConfig>) -> Result<()> {
    let config = config.unwrap_or_default();
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{rendered}");
    Ok(())
}
