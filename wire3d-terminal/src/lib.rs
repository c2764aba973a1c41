/// Terminal render loop for the ASCII wireframe renderer
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;
use wire3d_core::{
    FrameRenderer, Mesh, MeshConfig, MeshError, Preset, RenderConfig, RenderError,
    RotationPolicy, RotationState,
};

pub mod renderer;

pub use renderer::{TerminalGuard, TerminalSink};

/// The two display operations the render loop needs
pub trait FrameSink {
    /// Remove the previous frame
    fn clear(&mut self) -> io::Result<()>;
    /// Show one serialized frame
    fn emit(&mut self, frame: &str) -> io::Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn emit(&mut self, frame: &str) -> io::Result<()> {
        (**self).emit(frame)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Unknown preset '{0}', expected 'box' or 'cube'")]
    UnknownPreset(String),
}

/// Owns the scene and drives advance -> clear -> render -> sleep
pub struct App<S: FrameSink> {
    mesh: Mesh,
    rotation: RotationState,
    policy: RotationPolicy,
    config: RenderConfig,
    renderer: FrameRenderer,
    sink: S,
    running: bool,
    last_report: Instant,
    frame_count: u32,
}

impl<S: FrameSink> App<S> {
    pub fn new(
        mesh: Mesh,
        policy: RotationPolicy,
        config: RenderConfig,
        sink: S,
    ) -> Result<Self, AppError> {
        config.validate_rotation(policy)?;
        let renderer = FrameRenderer::new(&config)?;
        Ok(Self {
            mesh,
            rotation: RotationState::zero(),
            policy,
            config,
            renderer,
            sink,
            running: true,
            last_report: Instant::now(),
            frame_count: 0,
        })
    }

    /// Build the mesh (normalizing if configured) and wire it up
    pub fn from_mesh_config(
        mesh_config: &MeshConfig,
        policy: RotationPolicy,
        config: RenderConfig,
        sink: S,
    ) -> Result<Self, AppError> {
        let mesh = mesh_config.build()?;
        log::info!(
            "Loaded mesh: {} vertices, {} edges, {:?}",
            mesh.vertices().len(),
            mesh.edges().len(),
            policy
        );
        Self::new(mesh, policy, config, sink)
    }

    pub fn from_preset(preset: Preset, config: RenderConfig, sink: S) -> Result<Self, AppError> {
        log::info!("Using preset '{}'", preset.name());
        Self::from_mesh_config(&preset.mesh_config(), preset.rotation_policy(), config, sink)
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// One frame: advance rotation, clear, render, emit
    pub fn tick(&mut self) -> Result<(), AppError> {
        self.rotation.advance(self.config.rotation_delta, self.policy);
        self.sink.clear()?;
        let frame = self.renderer.render_frame(&self.mesh, &self.rotation)?;
        self.sink.emit(&frame)?;
        self.frame_count += 1;
        Ok(())
    }

    /// Run until `q`, `Esc` or `Ctrl-C`
    pub fn run(&mut self) -> Result<(), AppError> {
        let frame_time = self.config.frame_duration();

        while self.running {
            self.tick()?;

            // Fixed pacing, render time is not subtracted
            std::thread::sleep(frame_time);

            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            let now = Instant::now();
            let elapsed = now - self.last_report;
            if elapsed.as_secs() >= 1 {
                log::debug!(
                    "{} frames in {:.2}s ({:.1} fps)",
                    self.frame_count,
                    elapsed.as_secs_f32(),
                    self.frame_count as f32 / elapsed.as_secs_f32()
                );
                self.frame_count = 0;
                self.last_report = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false
                }
                _ => {}
            }
        }
        Ok(())
    }
}
