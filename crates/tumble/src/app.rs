//! Application state and main loop
//!
//! The loop pumps winit by hand instead of handing control to `run_app`:
//! drain every pending event, let [`Scene::advance`] decide whether to stop
//! or step, then draw, present and sleep.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use tumble_core::{BodyId, Frame, LoopEvent, LoopState, Scene, SceneConfig};

use crate::error::StartupError;
use crate::render::{Renderer, Sprite};
use crate::stats::FrameStats;

/// Main application state
pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    scene: Scene,

    ground_sprite: Sprite,
    box_sprite: Sprite,

    /// Events collected during the current pump
    pending_events: Vec<LoopEvent>,
    state: LoopState,
    stats: FrameStats,
}

impl App {
    /// Build the physics world, window, renderer and sprites, in that order
    pub async fn new() -> Result<(Self, EventLoop<()>), StartupError> {
        let config = SceneConfig::load();
        let scene = Scene::new(config);

        let event_loop = EventLoop::new()?;

        let window_attrs = WindowAttributes::default()
            .with_title("Tumble")
            .with_inner_size(LogicalSize::new(
                scene.config().screen_width,
                scene.config().screen_height,
            ))
            .with_resizable(false);

        // Use deprecated create_window so the window exists before the first pump
        #[allow(deprecated)]
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = Renderer::new(window.clone(), *scene.viewport()).await?;

        let ground_sprite = renderer.create_sprite(
            "ground_sprite",
            scene.sprite_size(BodyId::Ground),
            scene.color(BodyId::Ground),
        );
        let box_sprite = renderer.create_sprite(
            "box_sprite",
            scene.sprite_size(BodyId::Box),
            scene.color(BodyId::Box),
        );

        log::info!(
            "Window {}x{} ready",
            renderer.size().width,
            renderer.size().height
        );

        Ok((
            Self {
                window,
                renderer,
                scene,
                ground_sprite,
                box_sprite,
                pending_events: Vec::new(),
                state: LoopState::Running,
                stats: FrameStats::new(),
            },
            event_loop,
        ))
    }

    /// Run until the window is closed
    pub fn run(mut event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        let frame_delay = app.scene.config().frame_delay();

        while app.state.is_running() {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut app)
            {
                log::debug!("Event loop exited with code {}", code);
                app.pending_events.push(LoopEvent::Quit);
            }

            let (state, frame) = app.scene.advance(app.state, app.pending_events.drain(..));
            app.state = state;
            let Some(frame) = frame else { break };

            app.draw(&frame)?;
            std::thread::sleep(frame_delay);
        }

        log::info!("Shutting down after {} frames", app.scene.frame_count());
        Ok(())
    }

    /// Report, draw and present a stepped frame
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.stats.begin_frame();

        println!("{}", frame.box_report());

        let draws: Vec<(&Sprite, _)> = frame
            .entities
            .iter()
            .map(|entity| {
                let sprite = match entity.id {
                    BodyId::Ground => &self.ground_sprite,
                    BodyId::Box => &self.box_sprite,
                };
                (sprite, entity.transform)
            })
            .collect();

        match self.renderer.render(&draws) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("GPU out of memory");
            }
            Err(e) => {
                log::error!("Render error: {}", e);
            }
        }

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is created up front
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if window_id != self.window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.pending_events.push(LoopEvent::Quit);
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.pending_events.push(LoopEvent::Other);
            }
            _ => {
                self.pending_events.push(LoopEvent::Other);
            }
        }
    }
}
