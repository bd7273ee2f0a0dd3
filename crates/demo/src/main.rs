// File: crates/demo/src/main.rs
// Summary: Loads a scene deck, replays a next/prev script and writes one SVG (and optional PNG) per drawn frame.

use anyhow::{Context, Result};
use clap::Parser;
use scene_core::scene::parse_script;
use scene_core::{render_svg, theme, Completion, CsvDirSource, Frame, RenderOptions, SceneDeck, SceneRenderer};
use scene_render_skia::SkiaRenderer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "courtside-demo", about = "Step through a scrollytelling scene deck and render each scene")]
struct Cli {
    /// Scene deck JSON.
    #[arg(long, default_value = "data/deck.json")]
    deck: PathBuf,

    /// Directory the deck's `source` CSV names are resolved against.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Output directory for scene-<k>.svg / .png.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Navigation script, e.g. "nnpn" or "next next prev 4".
    #[arg(long, default_value = "")]
    script: String,

    /// 1-based scene to start on.
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Theme preset (light, dark).
    #[arg(long, default_value = "light")]
    theme: String,

    /// Also rasterize PNGs with Skia.
    #[arg(long)]
    png: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let deck = SceneDeck::from_path(&cli.deck).with_context(|| format!("loading deck {}", cli.deck.display()))?;
    let actions = parse_script(&cli.script).context("parsing --script")?;
    tracing::info!(title = %deck.title, scenes = deck.len(), steps = actions.len(), "deck loaded");

    let source = CsvDirSource::new(&cli.data);
    let opts = RenderOptions { theme: theme::find(&cli.theme), ..RenderOptions::default() };
    let mut renderer = SceneRenderer::new(deck, opts);
    let skia = cli.png.then(SkiaRenderer::new);
    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;

    let first = renderer.open(cli.start, &source);
    emit(&renderer, first, &cli.out, skia.as_ref())?;

    for action in actions {
        match renderer.step(action, &source) {
            Some(done) => emit(&renderer, Some(done), &cli.out, skia.as_ref())?,
            None => tracing::info!(?action, scene = renderer.state().index(), "no scene change"),
        }
    }
    Ok(())
}

/// Write the current frame when the last load actually produced one.
fn emit(renderer: &SceneRenderer, done: Option<Completion>, out: &Path, skia: Option<&SkiaRenderer>) -> Result<()> {
    let (Some(done), Some(frame)) = (done, renderer.frame()) else { return Ok(()) };
    if done == Completion::Stale {
        return Ok(());
    }
    let scene = renderer.state().index();
    write_frame(frame, scene, out, skia)?;
    println!("[{scene}/{}] {}", renderer.state().count(), frame.caption);
    Ok(())
}

fn write_frame(frame: &Frame, scene: usize, out: &Path, skia: Option<&SkiaRenderer>) -> Result<()> {
    let svg_path = out.join(format!("scene-{scene}.svg"));
    std::fs::write(&svg_path, render_svg(frame)).with_context(|| format!("writing {}", svg_path.display()))?;
    tracing::info!(path = %svg_path.display(), status = ?frame.status, "wrote svg");
    if let Some(skia) = skia {
        let png_path = svg_path.with_extension("png");
        skia.render_to_png(frame, &png_path)?;
        tracing::info!(path = %png_path.display(), "wrote png");
    }
    Ok(())
}
