use anyhow::{Context, Result};
use clap::Parser;
use mirrorpaint::background::{BackgroundSource, StaticImage};
use mirrorpaint::export::{self, encode_png, render_to_surface, save_png};
use mirrorpaint::resource::{Bitmap, FileResourceLoader};
use mirrorpaint::script::Script;
use mirrorpaint::{Config, Editor};
use std::path::PathBuf;

const DEFAULT_WIDTH: i32 = 800;
const DEFAULT_HEIGHT: i32 = 600;

#[derive(Parser, Debug)]
#[command(name = "mirrorpaint")]
#[command(version, about = "Paint makeup strokes and place stickers over a photo")]
struct Cli {
    /// Session script: a JSON list of input events to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// PNG drawn beneath the annotations
    #[arg(long, short = 'b', value_name = "FILE")]
    background: Option<PathBuf>,

    /// Directory sticker sources are resolved against
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// Output PNG (default: timestamped name in the current directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Canvas width in pixels (default: background width, or 800)
    #[arg(long)]
    width: Option<i32>,

    /// Canvas height in pixels (default: background height, or 600)
    #[arg(long)]
    height: Option<i32>,

    /// Config file (default: ~/.config/mirrorpaint/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(&cli.script)?;

    let background = match &cli.background {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read background {}", path.display()))?;
            let bitmap = Bitmap::from_png_bytes(&bytes)
                .with_context(|| format!("Failed to decode background {}", path.display()))?;
            Some(StaticImage::new(bitmap))
        }
        None => None,
    };

    let (default_w, default_h) = background
        .as_ref()
        .and_then(StaticImage::frame_size)
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let width = cli.width.unwrap_or(default_w);
    let height = cli.height.unwrap_or(default_h);

    let mut editor = Editor::from_config(&config);
    let loader = FileResourceLoader::new(&cli.assets);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(script.run(&mut editor, &loader));

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    log::info!(
        "Replayed {} event(s): {} stroke(s), {} sticker(s)",
        report.events_applied,
        editor.scene().strokes().len(),
        editor.scene().items().len()
    );

    let surface = render_to_surface(
        &editor,
        background.as_ref().map(|bg| bg as &dyn BackgroundSource),
        width,
        height,
    )?;
    let png = encode_png(&surface)?;

    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(export::generate_filename(
            &config.export.filename_template,
            "png",
        ))
    });
    let path = save_png(&png, &output)?;
    println!("Saved {}", path.display());

    Ok(())
}
