// ── App (winit ApplicationHandler) ──────────────────────────────────────────
//
// Owns the window, GPU renderer and audio device, and feeds the simulation
// one variable step per redraw. Everything the game decides comes back out
// through `Game::drain_events` and `Game::snapshot`.

use std::sync::Arc;

use glam::Vec2;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::audio::AudioContext;
use crate::camera::CameraUniform;
use crate::clock::FrameClock;
use crate::config::{GameConfig, WindowMode};
use crate::error::Result;
use crate::events::GameEvent;
use crate::game::Game;
use crate::input::InputState;
use crate::renderer::{self, LAYOUT, Renderer};

/// Open the window and run until the player quits or closes it.
pub fn run(config: GameConfig) -> Result<()> {
    let game = Game::new(config.clone())?;

    let mut audio = AudioContext::new();
    if audio.is_available() {
        let loaded = audio.load_cues(&config.audio_dir);
        info!(loaded, dir = %config.audio_dir.display(), "audio ready");
    }

    let event_loop = EventLoop::new()?;
    let mut app = App {
        clock: FrameClock::new(config.target_ups, config.max_frame_dt),
        config,
        game,
        audio,
        input: InputState::new(),
        renderer: None,
        failure: None,
    };
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: GameConfig,
    game: Game,
    audio: AudioContext,
    input: InputState,
    clock: FrameClock,
    renderer: Option<Renderer>,
    /// Startup error raised inside the event loop, reported after it exits.
    failure: Option<crate::Error>,
}

impl App {
    fn create_renderer(&self, event_loop: &ActiveEventLoop) -> Result<Renderer> {
        let mut attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        if self.config.mode == WindowMode::Borderless {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs)?);
        pollster::block_on(Renderer::new(window))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.game.frame(&self.input, dt);

        for event in self.game.drain_events() {
            match &event {
                GameEvent::Quit => {
                    info!("quit requested");
                    event_loop.exit();
                    return;
                }
                GameEvent::Hint(text) => debug!(hint = %text, "companion speaks"),
                GameEvent::Entered(mode) => debug!(?mode, "scene entered"),
                _ => {}
            }
            self.audio.handle(&event);
        }

        let frame = self.game.snapshot();
        let Some(renderer) = self.renderer.as_mut() else { return };

        renderer.update_camera(&CameraUniform::view(frame.camera, frame.zoom, frame.viewport));
        let painted = renderer::paint(&frame);
        match renderer.render(&painted, frame.background) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.window.inner_size();
                renderer.resize(size);
            }
            Err(e) => warn!(error = %e, "render error"),
        }

        self.input.clear_frame_state();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.create_renderer(event_loop) {
            Ok(renderer) => {
                info!(size = ?renderer.window.inner_size(), "window opened");
                self.renderer = Some(renderer);
                self.clock.reset();
            }
            Err(e) => {
                error!(error = %e, "failed to start renderer");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::Focused(true) => self.clock.reset(),

            WindowEvent::CursorMoved { position, .. } => {
                let Some(renderer) = self.renderer.as_ref() else { return };
                let physical = Vec2::new(position.x as f32, position.y as f32);
                if let Some(p) = renderer.viewport().to_layout(physical, LAYOUT) {
                    self.input.move_mouse(p.x, p.y);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.mouse_down(button),
                ElementState::Released => self.input.mouse_up(button),
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => self.input.key_down(code),
                ElementState::Released => self.input.key_up(code),
            },

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
