//! Main application entry point.

use clap::Parser;
use easel_app::{AppResult, Script, Session};
use easel_core::config::EditorConfig;
use easel_render::GridStyle;
use std::path::{Path, PathBuf};

/// Replay a scripted editing session and print the resulting canvas.
#[derive(Debug, Parser)]
#[command(name = "easel")]
#[command(about = "Replay a scripted Easel editing session")]
#[command(version)]
struct CliArgs {
    /// Session script (JSON)
    script: PathBuf,

    /// Editor configuration (JSON)
    config: Option<PathBuf>,

    /// Draw the grid as dots instead of lines
    #[arg(long)]
    dots: bool,

    /// Write the last rendered frame's display list to this file
    #[arg(long)]
    frame: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = CliArgs::parse();
    log::info!("Starting Easel session {}", args.script.display());

    match run(&args) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(args: &CliArgs) -> AppResult<String> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let script = Script::load(&args.script)?;
    let base_dir = args.script.parent().unwrap_or(Path::new("."));
    let grid = if args.dots { GridStyle::Dots } else { GridStyle::Lines };

    let mut session = Session::new(config)
        .with_base_dir(base_dir)
        .with_grid_style(grid);
    let snapshot = session.run(&script)?;

    if let (Some(path), Some(frame)) = (&args.frame, session.last_frame()) {
        std::fs::write(path, frame.to_json()?)?;
        log::info!("Wrote frame to {}", path.display());
    }
    Ok(snapshot.to_json()?)
}
