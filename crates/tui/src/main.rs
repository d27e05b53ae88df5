mod app;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use scaled_core::{WindowMetrics, config};
use scaled_protocol::ViewportSize;
use tracing_subscriber::EnvFilter;

/// Logical pixels per terminal cell when previewing the terminal itself.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

/// The terminal window, measured in approximate logical pixels.
struct TerminalWindow;

impl WindowMetrics for TerminalWindow {
    fn window_size(&self) -> ViewportSize {
        let (cols, rows) = crossterm::terminal::size().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to query terminal size; assuming 80x24");
            (80, 24)
        });
        ViewportSize::new(
            f64::from(cols) * CELL_WIDTH_PX,
            f64::from(rows) * CELL_HEIGHT_PX,
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let scale_config = match explicit {
        Some(path) => config::load_config(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => config::config_path(None)
            .map(|path| config::load_or_default(&path))
            .unwrap_or_default(),
    };

    let state = app::PreviewState::new(scale_config);
    renderer::run_preview(state, &TerminalWindow)
}
