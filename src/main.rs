//! Terminal grid editor (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from `grid_sandbox::term`.
//!
//! Configuration comes from the environment (see `EditorConfig::from_env`).
//! Logs go to `GRID_SANDBOX_LOG_PATH` when set; the alternate screen owns
//! stdout and stderr otherwise.

use std::fs::{self, OpenOptions};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use grid_sandbox::core::Palette;
use grid_sandbox::engine::{Editor, EditorConfig};
use grid_sandbox::input::{handle_key_event, mouse_to_pointer, should_quit};
use grid_sandbox::term::{EditorView, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use grid_sandbox::types::{STATIC_RENDER_INTERVAL_MS, TICK_MS};

fn main() -> Result<()> {
    let config = EditorConfig::from_env();
    init_logging(config.log_path.as_deref())?;

    let palette = load_palette(config.pieces_path.as_deref())?;
    log::info!(
        "starting: {}x{} grid, {} palette pieces, rotation {:?}",
        config.grid_size,
        config.grid_size,
        palette.len(),
        config.rotation_policy
    );
    let mut editor = Editor::from_config(&config, palette);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut editor);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_palette(path: Option<&str>) -> Result<Palette> {
    let Some(path) = path else {
        return Ok(Palette::builtin());
    };
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read palette {}", path))?;
    Palette::from_json(&json).with_context(|| format!("invalid palette {}", path))
}

fn run(term: &mut TerminalRenderer, editor: &mut Editor) -> Result<()> {
    let view = EditorView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_RENDER_INTERVAL_MS);

    let started = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut dirty = true;

    loop {
        // Layout first so hit testing matches what is on screen.
        view.sync_layout(editor, viewport);

        // Render.
        let fingerprint = editor.snapshot().fingerprint;
        let is_static = !dirty && !editor.is_dragging();
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint, is_static) {
            view.render_into(editor, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if !event::poll(tick_duration)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    if editor.apply_action(action) {
                        return Ok(());
                    }
                    dirty = true;
                }
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = mouse_to_pointer(mouse) {
                    dirty |= editor.handle_pointer(pointer);
                    if let Some(outcome) = editor.take_last_outcome() {
                        log::debug!("drag ended: {:?}", outcome);
                    }
                }
            }
            Event::Resize(w, h) => {
                // Geometry is refreshed on the next layout pass; grid state is untouched.
                viewport = Viewport::new(w, h);
                term.invalidate();
                throttle.invalidate();
            }
            _ => {}
        }
    }
}
