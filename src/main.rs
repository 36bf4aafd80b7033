mod cli;
mod commands;
mod error;
mod loader;
mod nav;
mod ui;
mod viewport;

use clap::Parser;
use std::path::PathBuf;
use std::process;
use winit::event_loop::EventLoop;

use crate::cli::Cli;
use crate::ui::state::ViewerState;
use crate::ui::App;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // More than one path: hand each file to its own viewer process.
    if cli.paths.len() > 1 {
        spawn_viewers(&cli.paths);
        return;
    }
    let initial = cli.paths.into_iter().next();

    let event_loop = EventLoop::new().expect("create event loop");
    let mut app = App::new(ViewerState::new(), initial);
    event_loop.run_app(&mut app).expect("run event loop");
}

fn spawn_viewers(paths: &[PathBuf]) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            log::error!("failed to locate executable: {}", e);
            process::exit(1);
        }
    };
    for path in paths {
        if let Err(e) = process::Command::new(&exe).arg(path).spawn() {
            log::error!("failed to spawn viewer for {}: {}", path.display(), e);
        }
    }
}
