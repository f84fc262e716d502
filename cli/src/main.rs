//! CLI entrypoint for spritebox
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use spritebox_application::{OutputSinkPort, RunFramesInput, RunFramesUseCase};
use spritebox_infrastructure::{
    CommandBufferRenderQueue, ConfigLoader, ConsoleBuffer, HeldKeys, ScriptDriver,
};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    for issue in config.validate() {
        warn!("config: {}", issue);
    }

    let source = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read script {}", cli.script.display()))?;

    // === Dependency Injection ===
    let render = Arc::new(Mutex::new(CommandBufferRenderQueue::new(
        config.render.to_render_limits(),
    )));
    let input = Arc::new(Mutex::new(HeldKeys::from_keys(
        config.input.held.iter().chain(&cli.hold).cloned(),
    )));
    let console = Arc::new(Mutex::new(ConsoleBuffer::new()));

    let mut driver = ScriptDriver::new(
        render.clone(),
        input,
        console.clone(),
        config.script.to_script_config(),
    )?;

    info!(script = %cli.script.display(), "Loading cartridge");
    if !driver.load(&source) {
        print_console(&console);
        return Ok(ExitCode::FAILURE);
    }

    let report = RunFramesUseCase::execute(&mut driver, RunFramesInput::new(cli.frames));
    driver.shutdown();

    print_console(&console);

    let commands = render
        .lock()
        .map_err(|e| anyhow::anyhow!("render queue lock poisoned: {}", e))?
        .take_commands();
    if cli.dump_draws {
        for command in &commands {
            println!("{}", command);
        }
    } else {
        println!(
            "{} frame(s), {} render command(s), {} failed update(s), {} failed draw(s){}",
            report.frames_run,
            commands.len(),
            report.failed_updates,
            report.failed_draws,
            if report.init_failed { ", init failed" } else { "" },
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn print_console(console: &Mutex<ConsoleBuffer>) {
    let lines = match console.lock() {
        Ok(console) => console.lines(),
        Err(poisoned) => poisoned.into_inner().lines(),
    };
    for line in lines {
        println!("{}", line);
    }
}
