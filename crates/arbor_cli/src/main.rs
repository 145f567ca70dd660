use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "arbor", about = "Render a JSON scene description to an image")]
struct Args {
    /// Scene description to render
    scene: PathBuf,

    /// Output image, overriding the scene's render output
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let scene = arbor_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let mut settings = scene
        .render_settings()
        .with_context(|| format!("Cannot render {}", args.scene.display()))?
        .clone();
    if let Some(output) = args.output {
        settings.output = output;
    }

    log::info!("Rendering scene '{}' to {}", scene.name, settings.output.display());
    arbor_renderer::render_to_file(&scene.root, &settings)
        .with_context(|| format!("Failed to render {}", settings.output.display()))?;

    Ok(())
}
