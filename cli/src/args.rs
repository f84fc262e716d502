//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for spritebox
#[derive(Parser, Debug)]
#[command(name = "spritebox")]
#[command(author, version, about = "Headless runner for spritebox cartridge scripts")]
#[command(long_about = r#"
Runs a Lua cartridge without the editor: the script is loaded, `_init` is
called once, then `_update` and `_draw` run for each frame. Console output
and script errors are printed when the run ends.

Configuration files are loaded from (in priority order):
1. SPRITEBOX_* environment variables (e.g. SPRITEBOX_SCRIPT__ERROR_PREFIX)
2. --config <path>       Explicit config file
3. ./spritebox.toml      Project-level config
4. ~/.config/spritebox/config.toml   Global config

Example:
  spritebox cart.lua
  spritebox cart.lua --frames 60 --hold left --hold x --dump-draws
"#)]
pub struct Cli {
    /// Cartridge script to run
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Number of frames to run after `_init`
    #[arg(short, long, default_value_t = 1)]
    pub frames: u64,

    /// Input held on every frame (can be specified multiple times)
    #[arg(long, value_name = "KEY")]
    pub hold: Vec<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Print every recorded render command instead of a summary
    #[arg(long)]
    pub dump_draws: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
