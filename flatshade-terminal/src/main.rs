/// flatshade terminal viewer
///
/// Renders the configured faces (a unit cube by default) and re-renders after
/// every key press.
/// Controls:
///   - W/S, A/D, Q/E: Move forward/back, left/right, down/up
///   - Arrow keys: Pitch and yaw (direction mode: nudge the view direction)
///   - Z/X: Roll
///   - F: Export the current frame as SVG
///   - Esc / Ctrl-C: Quit
use flatshade_terminal::{AppConfig, AppError, TerminalApp};

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = TerminalApp::from_config(config)?;
    app.run()
}
