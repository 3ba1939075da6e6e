/// Example: Render the configured scene straight to SVG on stdout
///
/// Usage: cargo run --example export_svg -- [faces.json [fills.json]]
use std::env;
use std::path::PathBuf;

use flatshade_core::{render, svg};
use flatshade_terminal::{load_assets, AppConfig, AppError};

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = AppConfig::load()?;
    let mut args = env::args().skip(1);
    if let Some(faces) = args.next() {
        config.assets.faces = Some(PathBuf::from(faces));
    }
    if let Some(fills) = args.next() {
        config.assets.fills = Some(PathBuf::from(fills));
    }

    let (mesh, fills) = load_assets(&config)?;
    let output = render(&mesh, &fills, &config.scene)?;
    eprintln!("Rendered {} of {} faces", output.len(), mesh.len());
    println!("{}", svg::document(&output, &config.scene));
    Ok(())
}
