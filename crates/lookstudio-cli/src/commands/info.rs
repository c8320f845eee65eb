use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lookstudio_core::config::StudioConfig;
use lookstudio_core::intake::{probe_dimensions, read_image_file, IntakePolicy};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs, config: &StudioConfig) -> Result<()> {
    let file = read_image_file(&args.file)?;
    let policy = IntakePolicy::from(&config.intake);

    println!("File:        {}", file.name);
    println!(
        "Type:        {}",
        file.mime_type.as_deref().unwrap_or("unknown")
    );
    println!("Size:        {:.1} KB", file.bytes.len() as f64 / 1024.0);

    match probe_dimensions(&file.bytes) {
        Ok((width, height)) => println!("Dimensions:  {}x{}", width, height),
        Err(e) => println!("Dimensions:  unavailable ({e})"),
    }

    match policy.check(&file.bytes, file.mime_type.as_deref()) {
        Ok(mime) => println!("Editable:    yes (sent as {mime})"),
        Err(e) => println!("Editable:    no ({e})"),
    }

    Ok(())
}
