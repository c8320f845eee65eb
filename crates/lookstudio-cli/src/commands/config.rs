use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lookstudio_core::config::StudioConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the active config as TOML. Without `--config` these are the defaults.
pub fn run(args: &ConfigArgs, config: &StudioConfig) -> Result<()> {
    // Keys stay in the environment or the user's own file.
    let mut config = config.clone();
    config.service.api_key = None;
    let toml_str = config.to_toml_string()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
