use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use toolgun_core::{
    AppConfig, Clock, FrameBuffer, InputSource, Pacer, ToolStateMachine,
};
use tracing_subscriber::EnvFilter;

mod sim;

use sim::{IdleInput, ScriptedInput, SimActuators, SimAudio, SimContent, SimDisplay};

fn main() -> toolgun_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            script,
            log_drop,
        } => run(&config, script.as_deref(), log_drop),
        Commands::Check { config } => check(&config),
    }
}

fn run(config_path: &Path, script: Option<&Path>, log_drop: bool) -> toolgun_core::Result<()> {
    let config = AppConfig::load(config_path)?;
    config.validate()?;
    tracing::info!(tools = config.tools.len(), "configuration loaded");

    let clock = Clock::new();
    let mut loader = SimContent::new(config.screen, config.default_background.clone());
    // The buffer's other handle would feed a decoupled refresh thread; the
    // simulator presents synchronously, so only the display side holds one.
    let frames = FrameBuffer::new(config.screen.width, config.screen.height);

    let mut machine = ToolStateMachine::new(
        &config,
        &mut loader,
        Box::new(SimAudio::new()),
        Box::new(SimDisplay::new(frames)),
        Box::new(SimActuators::default()),
        clock.now(),
    )?;
    machine.play_startup();

    let mut input: Box<dyn InputSource> = match script {
        Some(path) => {
            tracing::info!(?path, "replaying scripted trigger input");
            Box::new(ScriptedInput::load(path)?)
        }
        None => Box::new(IdleInput),
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, shutdown.clone())?;

    let mut pacer = Pacer::new(config.tick_rate_hz);
    while !shutdown.load(Ordering::Relaxed) {
        let raw = input.read_trigger();
        machine.tick(clock.now(), raw);

        if let Some(overrun) = pacer.wait() {
            if log_drop {
                tracing::warn!(overrun_secs = overrun.as_secs_f64(), "tick overran its budget");
            }
        }
    }

    tracing::info!("tearing down");
    Ok(())
}

fn check(config_path: &Path) -> toolgun_core::Result<()> {
    let config = AppConfig::load(config_path)?;
    config.validate()?;
    for tool in &config.tools {
        tracing::info!(
            name = %tool.name,
            hold = tool.hold,
            sounds = tool.sounds.len(),
            descriptions = tool.descriptions.len(),
            "tool"
        );
    }
    tracing::info!("configuration is valid");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Prop toolgun controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the controller with the simulated hardware backends.
    Run {
        /// Path to the JSON configuration.
        config: PathBuf,
        /// Optional trigger script to replay instead of an idle input line.
        #[arg(long)]
        script: Option<PathBuf>,
        /// Log a warning whenever a tick overruns its budget.
        #[arg(long)]
        log_drop: bool,
    },
    /// Validate a configuration file and exit.
    Check {
        /// Path to the JSON configuration.
        config: PathBuf,
    },
}
