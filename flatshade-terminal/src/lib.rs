/// Terminal viewer for the flatshade pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use flatshade_core::{input, render, svg, Fill, Mesh, Movement, RenderOutput, Vec3};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};

pub mod config;
pub mod renderer;

pub use config::{AppConfig, ConfigError};
pub use renderer::AsciiRenderer;

/// Palette cycled through when no fills file is configured
const PALETTE: [(f32, f32, f32); 6] = [
    (255.0, 0.0, 0.0),
    (0.0, 128.0, 0.0),
    (0.0, 0.0, 255.0),
    (255.0, 0.0, 255.0),
    (255.0, 255.0, 0.0),
    (0.0, 255.0, 255.0),
];

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Asset { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Scene(#[from] flatshade_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Movement),
    Export,
    Quit,
}

/// Key bindings shared by both camera modes
pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let movement = match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('f') | KeyCode::Char('F') => return Some(Action::Export),
        KeyCode::Up => Movement::PitchUp,
        KeyCode::Down => Movement::PitchDown,
        KeyCode::Left => Movement::YawLeft,
        KeyCode::Right => Movement::YawRight,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Movement::Forward,
            's' => Movement::Backward,
            'a' => Movement::Left,
            'd' => Movement::Right,
            'q' => Movement::Down,
            'e' => Movement::Up,
            'z' => Movement::RollLeft,
            'x' => Movement::RollRight,
            _ => return None,
        },
        _ => return None,
    };
    Some(Action::Move(movement))
}

/// Built-in fills for `count` faces
pub fn palette_fills(count: usize) -> Vec<Fill> {
    PALETTE
        .iter()
        .cycle()
        .take(count)
        .map(|&(r, g, b)| Fill::rgb(r, g, b))
        .collect()
}

/// Load faces and fills named by the assets section
pub fn load_assets(config: &AppConfig) -> Result<(Mesh, Vec<Fill>), AppError> {
    let mesh = match &config.assets.faces {
        Some(path) => input::parse_mesh(&read_asset(path)?)?,
        None => Mesh::cube(Vec3::new(-0.5, -0.5, -0.5), 1.0),
    };
    let fills = match &config.assets.fills {
        Some(path) => input::parse_fills(&read_asset(path)?)?,
        None => palette_fills(mesh.len()),
    };
    info!("loaded {} faces and {} fills", mesh.len(), fills.len());
    Ok((mesh, fills))
}

fn read_asset(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Asset {
        path: path.to_path_buf(),
        source,
    })
}

/// Main application struct for the terminal viewer
///
/// Renders once on start and again after every key that changes the scene.
pub struct TerminalApp {
    config: AppConfig,
    mesh: Mesh,
    fills: Vec<Fill>,
    output: RenderOutput,
    renderer: AsciiRenderer,
    status: String,
    running: bool,
}

impl TerminalApp {
    pub fn new(config: AppConfig, mesh: Mesh, fills: Vec<Fill>) -> Self {
        let mut app = Self {
            config,
            mesh,
            fills,
            output: RenderOutput::default(),
            renderer: AsciiRenderer::new(0, 0),
            status: String::new(),
            running: true,
        };
        app.refresh();
        app
    }

    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let (mesh, fills) = load_assets(&config)?;
        Ok(Self::new(config, mesh, fills))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Re-run the pipeline with the current scene
    pub fn refresh(&mut self) {
        match render(&self.mesh, &self.fills, &self.config.scene) {
            Ok(output) => {
                self.status = format!("{} faces", output.len());
                self.output = output;
            }
            Err(e) => {
                warn!("render failed: {}", e);
                self.status = e.to_string();
                self.output = RenderOutput::default();
            }
        }
    }

    /// Apply one key press; returns true if the scene changed
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match action_for_key(key) {
            Some(Action::Move(movement)) => {
                self.config.scene.camera.apply(movement);
                debug!("camera {:?} after {:?}", self.config.scene.camera, movement);
                self.refresh();
                true
            }
            Some(Action::Export) => {
                self.status = match self.export() {
                    Ok(path) => format!("exported {}", path.display()),
                    Err(e) => {
                        warn!("export failed: {}", e);
                        format!("export failed: {}", e)
                    }
                };
                false
            }
            Some(Action::Quit) => {
                self.running = false;
                false
            }
            None => false,
        }
    }

    /// Write the current render as an SVG document to the export path
    pub fn export(&self) -> Result<PathBuf, AppError> {
        let path = self.config.export.path.clone();
        fs::write(&path, svg::document(&self.output, &self.config.scene))?;
        info!("exported {} polygons to {}", self.output.len(), path.display());
        Ok(path)
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        self.draw()?;

        while self.running {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    self.handle_key(&key);
                }
                Event::Resize(..) => {}
                _ => continue,
            }
            if self.running {
                self.draw()?;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let status_rows = usize::from(self.config.controls.show_status);
        let grid_rows = (rows as usize).saturating_sub(status_rows);
        if self.renderer.width() != cols as usize || self.renderer.height() != grid_rows {
            self.renderer.resize(cols as usize, grid_rows);
        }

        self.renderer.clear();
        self.renderer.rasterize(
            &self.output,
            self.config.scene.width as f32,
            self.config.scene.height as f32,
            self.config.display.cell_aspect,
        );

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        self.renderer.draw(&mut stdout)?;

        if status_rows > 0 {
            queue!(
                stdout,
                cursor::MoveTo(0, rows.saturating_sub(1)),
                SetForegroundColor(Color::Yellow),
                Print(format!(
                    "flatshade | {} | WASD/QE=Move Arrows=Look Z/X=Roll F=Export Esc=Quit",
                    self.status
                )),
                ResetColor
            )?;
        }

        stdout.flush()
    }
}
