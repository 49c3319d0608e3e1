use arboard::Clipboard;
use astar_viz::config::{Config, LoadReport, CONFIG_PATH};
use astar_viz::layout::render_layout;
use astar_viz::{CellState, Editor, Position, SearchOutcome};
use macroquad::prelude::*;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

const TURQUOISE: Color = Color::new(0.25, 0.88, 0.82, 1.0);

/// Height of the status/help strip below the grid
const HELP_STRIP: f32 = 70.0;

/// Config read once by `window_conf`, before logging is set up
static STARTUP_CONFIG: OnceLock<(Config, LoadReport)> = OnceLock::new();

/// Display color for each cell state
fn state_color(state: CellState) -> Color {
    match state {
        CellState::Unvisited => WHITE,
        CellState::Start => TURQUOISE,
        CellState::End => BLACK,
        CellState::Barrier => ORANGE,
        CellState::Frontier => GREEN,
        CellState::Visited => GRAY,
        CellState::Path => PURPLE,
    }
}

/// Install the fmt subscriber; RUST_LOG takes precedence over the config level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}

fn startup_config() -> &'static (Config, LoadReport) {
    STARTUP_CONFIG.get_or_init(|| Config::read(CONFIG_PATH))
}

fn help_strip_height(config: &Config) -> f32 {
    if config.visual.show_help {
        HELP_STRIP
    } else {
        0.0
    }
}

fn window_conf() -> Conf {
    let (config, _) = startup_config();
    let size = config.grid.window_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: size as i32,
        window_height: (size + help_strip_height(config)) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Visualization state
struct VisState {
    editor: Editor,
    config: Config,
    status: String,
    /// Held for the whole session so copied text stays available
    clipboard: Option<Clipboard>,
}

impl VisState {
    fn new(config: Config) -> Self {
        let dimension = config.grid.dimension;
        let editor = if config.logging.enable_action_log {
            Editor::with_action_log(dimension)
        } else {
            Editor::new(dimension)
        };

        VisState {
            editor,
            config,
            status: "Place start, end, then barriers".to_string(),
            clipboard: None,
        }
    }

    fn cell_under_mouse(&self) -> Option<Position> {
        let (mouse_x, mouse_y) = mouse_position();
        self.editor
            .grid()
            .cell_at_pixel(mouse_x, mouse_y, self.config.grid.cell_size())
    }

    fn handle_input(&mut self) {
        // Buttons held, so dragging paints barriers
        if is_mouse_button_down(MouseButton::Left) {
            if let Some(pos) = self.cell_under_mouse() {
                self.editor.primary(pos);
            }
        } else if is_mouse_button_down(MouseButton::Right) {
            if let Some(pos) = self.cell_under_mouse() {
                self.editor.secondary(pos);
            }
        }

        if is_key_pressed(KeyCode::Space) && self.editor.begin_search() {
            self.status = "Searching...".to_string();
        }

        if is_key_pressed(KeyCode::C) {
            self.editor.reset();
            self.status = "Grid cleared".to_string();
        }

        if is_key_pressed(KeyCode::L) {
            self.copy_to_clipboard();
        }
    }

    fn update(&mut self) {
        if !self.editor.is_searching() {
            return;
        }
        let outcome = self.editor.advance(self.config.animation.steps_per_frame);
        let Some(stats) = self.editor.search_stats() else {
            return;
        };
        self.status = match outcome {
            None => format!(
                "Searching... {} expanded, {} in frontier",
                stats.expanded, stats.frontier
            ),
            Some(SearchOutcome::PathFound(path)) => format!(
                "Path found: {} moves, {} cells expanded",
                path.cost, stats.expanded
            ),
            Some(SearchOutcome::NoPathExists) => {
                format!("No path exists ({} cells expanded)", stats.expanded)
            }
        };
    }

    fn copy_to_clipboard(&mut self) {
        let layout = render_layout(self.editor.grid());
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    tracing::warn!("failed to access clipboard: {}", e);
                    return;
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        match clipboard.set_text(layout) {
            Ok(()) => {
                tracing::info!("grid layout copied to clipboard");
                self.status = "Layout copied to clipboard".to_string();
            }
            Err(e) => tracing::warn!("failed to copy to clipboard: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(WHITE);

        let grid = self.editor.grid();
        let cell_size = self.config.grid.cell_size();

        for cell in grid.cells() {
            let px = cell.position.col as f32 * cell_size;
            let py = cell.position.row as f32 * cell_size;
            draw_rectangle(px, py, cell_size, cell_size, state_color(cell.state));
        }

        if self.config.visual.show_grid_lines {
            let width = self.config.grid.window_size;
            for i in 0..=grid.dimension {
                let offset = i as f32 * cell_size;
                draw_line(0.0, offset, width, offset, 1.0, GRAY);
                draw_line(offset, 0.0, offset, width, 1.0, GRAY);
            }
        }

        if self.config.visual.show_help {
            let lines = [
                self.status.as_str(),
                "Left: start / end / barrier   Right: clear cell",
                "Space: search   C: clear grid   L: copy layout   Esc: quit",
            ];
            let top = self.config.grid.window_size;
            draw_rectangle(0.0, top, self.config.grid.window_size, HELP_STRIP, LIGHTGRAY);
            for (i, line) in lines.iter().enumerate() {
                draw_text(line, 10.0, top + 20.0 + i as f32 * 20.0, 20.0, DARKBLUE);
            }
        }
    }

    fn finish_session(&self) {
        let Some(log) = self.editor.action_log() else {
            return;
        };
        tracing::info!("session summary:\n{}", log.summary());
        match log.save_to_file(&self.config.logging.action_log_path) {
            Ok(()) => tracing::info!("action log saved to {}", self.config.logging.action_log_path),
            Err(e) => tracing::warn!("failed to save action log: {}", e),
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, report) = startup_config().clone();
    init_tracing(&config.logging.level);
    report.log(CONFIG_PATH);
    tracing::info!(dimension = config.grid.dimension, "starting visualizer");

    prevent_quit();
    let mut state = VisState::new(config);

    loop {
        // Quitting mid-search drops the search rather than letting it run on
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            state.editor.cancel_search();
            break;
        }

        state.handle_input();
        state.update();
        state.draw();

        next_frame().await
    }

    state.finish_session();
}
