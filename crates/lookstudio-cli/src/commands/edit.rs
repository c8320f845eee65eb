use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args};
use lookstudio_core::capability::GeminiClient;
use lookstudio_core::config::StudioConfig;
use lookstudio_core::controller::{EditController, Settlement, Submission};
use lookstudio_core::intake::{extension_for_mime, read_image_file};
use tracing::debug;

use crate::progress::SpinnerObserver;
use crate::summary::{self, EditSummary};

#[derive(Args)]
#[command(group(ArgGroup::new("instruction").required(true).args(["prompt", "style"])))]
pub struct EditArgs {
    /// Input image file (PNG, JPEG or WebP)
    pub file: PathBuf,

    /// Free-text editing instruction, e.g. "make it black and white"
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Style preset name (see `lookstudio styles`)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Output file path [default: <input>-edited.<ext>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &EditArgs, config: &StudioConfig) -> Result<()> {
    let file = read_image_file(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let client = GeminiClient::new(&config.service)?;

    let mut controller = EditController::from_config(config);
    controller.subscribe(Box::new(SpinnerObserver::new()?));
    controller
        .load_image(file.bytes, file.mime_type.as_deref())
        .with_context(|| format!("Cannot edit {}", args.file.display()))?;

    let preset = match args.style {
        Some(ref name) => Some(config.styles.get(name)?),
        None => None,
    };
    let instruction = match (preset, &args.prompt) {
        (Some(preset), _) => preset.instruction.as_str(),
        (None, Some(prompt)) => prompt.as_str(),
        (None, None) => bail!("Provide --prompt or --style"),
    };

    let mime_type = controller
        .session()
        .original()
        .map(|original| original.mime_type().to_string())
        .unwrap_or_default();
    summary::print_edit_summary(&EditSummary {
        input: &args.file,
        mime_type: &mime_type,
        model: client.model(),
        style: preset.map(|p| p.name.as_str()),
        instruction,
    });

    let submission = match preset {
        Some(preset) => controller.select_style(preset),
        None => controller.submit_edit(instruction),
    };
    let job = match submission {
        Submission::Dispatched(job) => job,
        Submission::Invalid(e) => bail!(e),
        Submission::Busy | Submission::InstructionOnly => {
            bail!("The edit request could not be started")
        }
    };

    if controller.execute(job, &client) != Settlement::Succeeded {
        let message = controller
            .session()
            .error()
            .unwrap_or("The edit did not complete")
            .to_string();
        bail!(message);
    }

    let result = controller
        .session()
        .result()
        .context("No edited image was stored")?;
    let bytes = result.decode()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.file, result.mime_type()));

    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    debug!(path = %output.display(), size = bytes.len(), "Wrote edited image");
    summary::print_result(&output, result.mime_type(), bytes.len());

    Ok(())
}

/// `photo.jpg` edited to PNG becomes `photo-edited.png` next to the input.
fn default_output_path(input: &Path, mime_type: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let ext = extension_for_mime(mime_type).unwrap_or("png");
    input.with_file_name(format!("{stem}-edited.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_result_type() {
        assert_eq!(
            default_output_path(Path::new("shots/photo.jpg"), "image/png"),
            PathBuf::from("shots/photo-edited.png")
        );
        assert_eq!(
            default_output_path(Path::new("photo.png"), "image/jpeg"),
            PathBuf::from("photo-edited.jpg")
        );
        assert_eq!(
            default_output_path(Path::new("photo"), "application/x-unknown"),
            PathBuf::from("photo-edited.png")
        );
    }
}
