// File: crates/window-demo/src/main.rs
// Summary: Windowed scene stepper. Arrow keys navigate, loads run on a worker thread,
// results come back through the event loop proxy and stale ones are ignored.

use anyhow::{Context, Result};
use clap::Parser;
use scene_core::{theme, Action, Completion, CsvDirSource, Frame, LoadTicket, RenderOptions, SceneDeck, SceneLoad, SceneRenderer};
use scene_render_skia::SkiaRenderer;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::mpsc;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

#[derive(Parser, Debug)]
#[command(name = "courtside-window-demo", about = "Step through a scene deck in a window (Left/Right/Home)")]
struct Cli {
    #[arg(long, default_value = "data/deck.json")]
    deck: PathBuf,
    #[arg(long, default_value = "data")]
    data: PathBuf,
    #[arg(long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let deck = SceneDeck::from_path(&cli.deck).with_context(|| format!("loading deck {}", cli.deck.display()))?;
    let title = format!("Courtside: {}", deck.title);
    let opts = RenderOptions { theme: theme::find(&cli.theme), ..RenderOptions::default() };
    let (width, height) = (opts.width, opts.height);
    let mut renderer = SceneRenderer::new(deck, opts);

    let event_loop = EventLoopBuilder::<SceneLoad>::with_user_event().build();
    let loads = spawn_loader(CsvDirSource::new(&cli.data), event_loop.create_proxy());

    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let skia = SkiaRenderer::new();
    let mut pixels: Vec<u32> = Vec::new();
    let mut dirty = true;

    // initial scene
    submit(&loads, renderer.reload());

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(_) => dirty = true,
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => {
                    let action = match key {
                        VirtualKeyCode::Right | VirtualKeyCode::Down | VirtualKeyCode::Space => Some(Action::Next),
                        VirtualKeyCode::Left | VirtualKeyCode::Up => Some(Action::Prev),
                        VirtualKeyCode::Home => Some(Action::Jump(1)),
                        VirtualKeyCode::Escape => {
                            *cf = ControlFlow::Exit;
                            None
                        }
                        _ => None,
                    };
                    if let Some(ticket) = action.and_then(|a| renderer.dispatch(a)) {
                        submit(&loads, Some(ticket));
                        dirty = true;
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::UserEvent(load) => {
                if renderer.complete(load) != Completion::Stale {
                    dirty = true;
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                let Some(frame) = renderer.frame() else { return };
                if dirty {
                    match rasterize(&skia, frame) {
                        Ok(buf) => pixels = buf,
                        Err(e) => tracing::error!(error = %e, "raster failed"),
                    }
                    dirty = false;
                }
                let size = window.inner_size();
                if let Err(e) = present(&mut surface, &pixels, frame, size.width, size.height) {
                    tracing::error!(error = %e, "present failed");
                }
            }
            _ => {}
        }
    });
}

/// One worker thread runs tickets in order and posts each result back to the event loop.
fn spawn_loader(source: CsvDirSource, proxy: EventLoopProxy<SceneLoad>) -> mpsc::Sender<LoadTicket> {
    let (tx, rx) = mpsc::channel::<LoadTicket>();
    std::thread::spawn(move || {
        for ticket in rx {
            let load = ticket.run(&source);
            if proxy.send_event(load).is_err() {
                // event loop gone
                break;
            }
        }
    });
    tx
}

fn submit(loads: &mpsc::Sender<LoadTicket>, ticket: Option<LoadTicket>) {
    let Some(ticket) = ticket else { return };
    tracing::debug!(scene = ticket.scene, generation = ticket.generation, "queue scene load");
    if loads.send(ticket).is_err() {
        tracing::error!("scene loader thread is gone");
    }
}

/// Skia RGBA8 -> softbuffer 0RGB.
fn rasterize(skia: &SkiaRenderer, frame: &Frame) -> Result<Vec<u32>> {
    let (rgba, _, _, _) = skia.render_to_rgba8(frame)?;
    Ok(rgba
        .chunks_exact(4)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect())
}

fn present(
    surface: &mut softbuffer::Surface,
    pixels: &[u32],
    frame: &Frame,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else { return Ok(()) };
    surface.resize(w, h).map_err(|e| anyhow::anyhow!("resize: {e}"))?;
    let mut buffer = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;

    let bg = frame.background;
    let fill = ((bg.r as u32) << 16) | ((bg.g as u32) << 8) | bg.b as u32;
    buffer.fill(fill);

    // blit top-left, clipped to the window
    let (fw, fh) = (frame.width as usize, frame.height as usize);
    let (ww, wh) = (width as usize, height as usize);
    if pixels.len() == fw * fh {
        for row in 0..fh.min(wh) {
            let n = fw.min(ww);
            buffer[row * ww..row * ww + n].copy_from_slice(&pixels[row * fw..row * fw + n]);
        }
    }
    buffer.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}
