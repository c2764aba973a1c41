/// Wire3D Terminal Demo - Rotating Wireframe
///
/// Usage: wire3d-terminal [box|cube]
///   - box:  irregular hexahedron, normalized, spinning on all axes (default)
///   - cube: unit cube spinning about X and Z
/// Controls:
///   - Q/ESC/Ctrl-C: Quit

use std::env;
use std::io;
use std::process::ExitCode;
use wire3d_core::{Preset, RenderConfig};
use wire3d_terminal::{App, AppError, TerminalGuard, TerminalSink};

fn run() -> Result<(), AppError> {
    let preset = match env::args().nth(1) {
        Some(name) => Preset::from_name(&name).ok_or(AppError::UnknownPreset(name))?,
        None => Preset::default(),
    };

    // Build before touching the terminal so startup errors print normally
    let mut app = App::from_preset(preset, RenderConfig::default(), TerminalSink::new(io::stdout()))?;

    let _guard = TerminalGuard::enter()?;
    app.run()
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wire3d-terminal: {}", e);
            ExitCode::FAILURE
        }
    }
}
