use std::path::PathBuf;
use std::process;

use crate::commands::{Background, Command, Interpolation};
use crate::loader::{load_image, LoadedImage};
use crate::nav;
use crate::ui::render::blit_image;
use crate::viewport::{self, ViewportState};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

pub struct ViewerState {
    pub path: Option<PathBuf>,
    pub image: Option<LoadedImage>,
    pub viewport: ViewportState,

    /// Clockwise quarter-turns applied to the displayed image.
    pub rotation: u8,
    pub flip_h: bool,
    pub flip_v: bool,

    pub interpolation: Interpolation,
    pub background: Background,

    // Drag gesture. The pan is recomputed each tick from the pointer's
    // distance to its position at gesture start, applied to the viewport as
    // it was at gesture start.
    pub dragging: bool,
    pub drag_start: (f64, f64),
    pub drag_start_viewport: ViewportState,
    pub last_drag_pos: (f64, f64),
    pub mouse_pos: (f64, f64),
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            path: None,
            image: None,
            viewport: ViewportState::default(),
            rotation: 0,
            flip_h: false,
            flip_v: false,
            interpolation: Interpolation::Nearest,
            background: Background::Black,
            dragging: false,
            drag_start: (0.0, 0.0),
            drag_start_viewport: ViewportState::default(),
            last_drag_pos: (0.0, 0.0),
            mouse_pos: (0.0, 0.0),
        }
    }

    /// Displayed image dimensions, accounting for rotation.
    pub fn effective_dims(&self) -> Option<(f32, f32)> {
        let img = self.image.as_ref()?;
        Some(if self.rotation % 2 == 1 {
            (img.height as f32, img.width as f32)
        } else {
            (img.width as f32, img.height as f32)
        })
    }

    /// Load `path` and fit it to the window. On failure the user gets a
    /// blocking error dialog and the previously displayed image is retained.
    pub fn load_path(&mut self, path: PathBuf, client_w: f32, client_h: f32) {
        match load_image(&path) {
            Ok(img) => {
                let w = img.width as f32;
                let h = img.height as f32;
                self.image = Some(img);
                self.path = Some(path);
                self.rotation = 0;
                self.flip_h = false;
                self.flip_v = false;
                self.viewport = viewport::fit_to_window(w, h, client_w, client_h);
            }
            Err(e) => {
                log::error!("{}", e);
                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Failed to Open Image")
                    .set_description(e.to_string())
                    .show();
            }
        }
    }

    /// Run one UI action. Returns true if the app should quit.
    pub fn apply_command(&mut self, cmd: Command, client_w: f32, client_h: f32) -> bool {
        match cmd {
            Command::Quit => return true,

            Command::OpenImage => {
                let picked = rfd::FileDialog::new()
                    .set_title("Open Image")
                    .add_filter("Images", nav::IMAGE_EXTENSIONS)
                    .pick_file();
                if let Some(path) = picked {
                    self.load_path(path, client_w, client_h);
                }
            }

            Command::SetInterpolation(mode) => self.interpolation = mode,
            Command::SetBackground(color) => self.background = color,

            Command::ResetFit => {
                if let Some((w, h)) = self.effective_dims() {
                    self.viewport = viewport::fit_to_window(w, h, client_w, client_h);
                }
            }
            Command::ResetActualSize => {
                if let Some((w, h)) = self.effective_dims() {
                    self.viewport = viewport::actual_size(w, h, client_w, client_h);
                }
            }

            Command::NewWindow => spawn_new_window(),

            Command::NextImage => self.navigate(nav::next_image, client_w, client_h),
            Command::PrevImage => self.navigate(nav::prev_image, client_w, client_h),

            Command::RotateCw => self.rotate(true, client_w, client_h),
            Command::RotateCcw => self.rotate(false, client_w, client_h),

            Command::FlipHorizontal => {
                if let Some((w, _)) = self.effective_dims() {
                    self.viewport = viewport::flip_horizontal(self.viewport, w, client_w);
                    self.flip_h = !self.flip_h;
                }
            }
            Command::FlipVertical => {
                if let Some((_, h)) = self.effective_dims() {
                    self.viewport = viewport::flip_vertical(self.viewport, h, client_h);
                    self.flip_v = !self.flip_v;
                }
            }
        }
        false
    }

    fn navigate(
        &mut self,
        step: fn(&std::path::Path) -> Option<PathBuf>,
        client_w: f32,
        client_h: f32,
    ) {
        let Some(current) = self.path.clone() else {
            return;
        };
        match step(&current) {
            Some(next) => self.load_path(next, client_w, client_h),
            None => log::info!("no sibling image to navigate to"),
        }
    }

    fn rotate(&mut self, clockwise: bool, client_w: f32, client_h: f32) {
        let Some((w, h)) = self.effective_dims() else {
            return;
        };
        self.viewport = viewport::rotate_quarter(self.viewport, clockwise, w, h, client_w, client_h);
        self.rotation = if clockwise {
            (self.rotation + 1) % 4
        } else {
            (self.rotation + 3) % 4
        };
    }

    /// One wheel tick at the current cursor position.
    pub fn zoom_at_cursor(&mut self, zoom_in: bool) {
        if self.image.is_none() {
            return;
        }
        let pivot = (self.mouse_pos.0 as f32, self.mouse_pos.1 as f32);
        self.viewport = viewport::zoom(self.viewport, pivot, zoom_in);
    }

    /// Refit after a window resize; a free-floating view keeps its placement.
    pub fn window_resized(&mut self, client_w: f32, client_h: f32) {
        if !self.viewport.fitted {
            return;
        }
        if let Some((w, h)) = self.effective_dims() {
            self.viewport = viewport::fit_to_window(w, h, client_w, client_h);
        }
    }

    pub fn begin_drag(&mut self) {
        if self.image.is_none() {
            return;
        }
        self.dragging = true;
        self.drag_start = self.mouse_pos;
        self.last_drag_pos = self.mouse_pos;
        self.drag_start_viewport = self.viewport;
    }

    /// One drag tick. Returns true if the origin moved (redraw needed);
    /// ticks where the pointer has not moved are skipped.
    pub fn drag_tick(&mut self) -> bool {
        if !self.dragging || self.mouse_pos == self.last_drag_pos {
            return false;
        }
        self.last_drag_pos = self.mouse_pos;
        let dx = (self.mouse_pos.0 - self.drag_start.0) as f32;
        let dy = (self.mouse_pos.1 - self.drag_start.1) as f32;
        self.viewport = viewport::pan(self.drag_start_viewport, dx, dy);
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Render into the softbuffer framebuffer.
    pub fn render(&self, frame: &mut [u32], fb_w: u32, fb_h: u32) {
        frame.fill(self.background.pixel());

        if let Some(ref img) = self.image {
            blit_image(
                frame,
                fb_w,
                fb_h,
                &img.rgba_bytes,
                img.width,
                img.height,
                self.viewport.origin.0,
                self.viewport.origin.1,
                self.viewport.scale,
                self.rotation,
                self.flip_h,
                self.flip_v,
                self.interpolation,
            );
        }
    }

    /// Window title: program name, plus the loaded path.
    pub fn title(&self) -> String {
        match &self.path {
            Some(p) => format!("pv - {}", p.display()),
            None => "pv".to_string(),
        }
    }
}

/// Launch an independent viewer process with no arguments.
fn spawn_new_window() {
    match std::env::current_exe() {
        Ok(exe) => {
            if let Err(e) = process::Command::new(exe).spawn() {
                log::error!("failed to launch new window: {}", e);
            }
        }
        Err(e) => log::error!("failed to locate executable: {}", e),
    }
}
