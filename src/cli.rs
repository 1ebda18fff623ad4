//! Command-line options and config file loading for the terminal driver.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::types::GameConfig;

pub const USAGE: &str = "\
usage: stacker [--config <file>] [--seed <u64>]

options:
  --config <file>  JSON game config; omitted fields keep their defaults
  --seed <u64>     piece sequence seed (overrides the config file)
  --help           print this message

keys: arrows/hjkl/wasd move, up/x rotate cw, z rotate ccw, space hard drop,
      c hold, p pause, r restart, q quit
logging: set RUST_LOG (e.g. RUST_LOG=debug) and redirect stderr";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub help: bool,
}

/// Parse arguments (program name already stripped).
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                options.config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                options.seed = Some(seed);
            }
            "-h" | "--help" => options.help = true,
            other => return Err(anyhow!("unknown argument: {}\n\n{}", other, USAGE)),
        }
        i += 1;
    }
    Ok(options)
}

/// Parse a JSON config. Missing fields take their defaults.
pub fn parse_config(json: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(json).context("malformed config")?;
    Ok(config)
}

/// Build the effective config: file (if any), then the `--seed` override,
/// then validation.
pub fn load_config(options: &CliOptions) -> Result<GameConfig> {
    let mut config = match &options.config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            parse_config(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    config.validate().context("invalid config")?;
    Ok(config)
}
