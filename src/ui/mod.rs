use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};
use softbuffer::Surface;

use crate::commands::{command_for_char, command_for_named};
use crate::ui::state::ViewerState;

pub mod render;
pub mod state;

/// Time between drag samples while the left button is held.
const DRAG_INTERVAL: Duration = Duration::from_millis(13);

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewerState,
    pub window: Option<Arc<Window>>,
    pub context: Option<softbuffer::Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    /// Image to load once the window exists (from the command line).
    pending_path: Option<PathBuf>,
    /// When the next drag sample is due, while a drag gesture is active.
    next_drag_tick: Option<Instant>,
}

impl App {
    pub fn new(state: ViewerState, pending_path: Option<PathBuf>) -> Self {
        Self {
            state,
            window: None,
            context: None,
            surface: None,
            pending_path,
            next_drag_tick: None,
        }
    }

    fn client_size(&self) -> (f32, f32) {
        match &self.window {
            Some(w) => {
                let size = w.inner_size();
                (size.width.max(1) as f32, size.height.max(1) as f32)
            }
            None => (1.0, 1.0),
        }
    }

    fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn sync_title(&self) {
        if let Some(ref window) = self.window {
            window.set_title(&self.state.title());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(self.state.title())
            .with_inner_size(LogicalSize::new(1280u32, 720u32));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        let context = softbuffer::Context::new(Arc::clone(&window)).expect("create context");
        let surface = Surface::new(&context, Arc::clone(&window)).expect("create surface");

        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);

        if let Some(path) = self.pending_path.take() {
            let (cw, ch) = self.client_size();
            self.state.load_path(path, cw, ch);
            self.sync_title();
        }
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let w = width.max(1);
                let h = height.max(1);
                if let Some(ref mut surface) = self.surface {
                    let _ = surface.resize(
                        std::num::NonZeroU32::new(w).unwrap(),
                        std::num::NonZeroU32::new(h).unwrap(),
                    );
                }
                self.state.window_resized(w as f32, h as f32);
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let cmd = match &event.logical_key {
                    Key::Named(named) => command_for_named(*named),
                    Key::Character(s) => s.chars().next().and_then(|c| {
                        command_for_char(c, self.state.interpolation, self.state.background)
                    }),
                    _ => None,
                };
                if let Some(cmd) = cmd {
                    let (cw, ch) = self.client_size();
                    if self.state.apply_command(cmd, cw, ch) {
                        event_loop.exit();
                        return;
                    }
                    self.sync_title();
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    if state == ElementState::Pressed {
                        self.state.begin_drag();
                        if self.state.dragging {
                            self.next_drag_tick = Some(Instant::now() + DRAG_INTERVAL);
                        }
                    } else {
                        self.state.end_drag();
                        self.next_drag_tick = None;
                    }
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.state.mouse_pos = (x, y);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y as f32 / 40.0,
                };
                if y != 0.0 {
                    self.state.zoom_at_cursor(y > 0.0);
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(ref window) = self.window else { return };
                if let Some(ref mut surface) = self.surface {
                    let size = window.inner_size();
                    let fb_w = size.width.max(1);
                    let fb_h = size.height.max(1);
                    if let Ok(mut buffer) = surface.buffer_mut() {
                        self.state.render(&mut buffer, fb_w, fb_h);
                        let _ = buffer.present();
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Drag sampling: while the button is held, take a pan sample every
        // DRAG_INTERVAL; the gesture ends as soon as the button is released.
        if let Some(when) = self.next_drag_tick {
            if !self.state.dragging {
                self.next_drag_tick = None;
            } else if Instant::now() >= when {
                if self.state.drag_tick() {
                    self.request_redraw();
                }
                self.next_drag_tick = Some(Instant::now() + DRAG_INTERVAL);
            }
        }

        match self.next_drag_tick {
            Some(when) => event_loop.set_control_flow(ControlFlow::WaitUntil(when)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
