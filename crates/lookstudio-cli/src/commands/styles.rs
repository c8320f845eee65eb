use anyhow::Result;
use lookstudio_core::config::StudioConfig;

use crate::summary;

pub fn run(config: &StudioConfig) -> Result<()> {
    summary::print_styles(&config.styles);
    Ok(())
}
