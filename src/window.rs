//! SDL2 presentation of rendered frames.
//!
//! The renderer never touches SDL: each frame is an [`ImageBuffer`] that
//! [`Window::present`] copies into a streaming RGB24 texture, which is then
//! stretched over the whole window.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;
use sdl2::EventPump;

use crate::camera::CameraInput;
use crate::config::RenderMode;
use crate::render::ImageBuffer;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u32 = 60;

/// Events the main loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resized { width: u32, height: u32 },
    RenderMode(RenderMode),
}

/// Caps the main loop at a fixed frame rate.
#[derive(Debug)]
pub struct FrameLimiter {
    frame_time: Duration,
    previous: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / fps.max(1),
            previous: Instant::now(),
        }
    }

    /// Sleeps off whatever is left of the frame budget and returns the time
    /// since the previous call.
    pub fn wait(&mut self) -> Duration {
        let busy = self.previous.elapsed();
        if busy < self.frame_time {
            thread::sleep(self.frame_time - busy);
        }
        let now = Instant::now();
        let delta = now - self.previous;
        self.previous = now;
        delta
    }
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Borrows from `texture_creator`; declared first so it is dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let canvas = sdl
            .video()?
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = Box::new(canvas.texture_creator());
        let texture = frame_texture(&texture_creator, width, height)?;
        let event_pump = sdl.event_pump()?;
        info!("opened {width}x{height} window `{title}`");

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            width,
            height,
        })
    }

    /// Drains pending SDL events. Window close and Escape quit; keys 1 and 2
    /// switch between filled and wireframe rendering.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::Num1),
                    ..
                } => events.push(WindowEvent::RenderMode(RenderMode::Filled)),
                Event::KeyDown {
                    keycode: Some(Keycode::Num2),
                    ..
                } => events.push(WindowEvent::RenderMode(RenderMode::Wireframe)),
                Event::Window {
                    win_event: SdlWindowEvent::Resized(w, h) | SdlWindowEvent::SizeChanged(w, h),
                    ..
                } if w > 0 && h > 0 => events.push(WindowEvent::Resized {
                    width: w as u32,
                    height: h as u32,
                }),
                _ => {}
            }
        }
        events
    }

    /// Movement keys currently held: WASD to move, Q/E for up/down, arrows
    /// to look around.
    pub fn camera_input(&self) -> CameraInput {
        let keys = self.event_pump.keyboard_state();
        let held = |scancode| keys.is_scancode_pressed(scancode);
        CameraInput {
            forward: held(Scancode::W),
            back: held(Scancode::S),
            right: held(Scancode::D),
            left: held(Scancode::A),
            up: held(Scancode::Q),
            down: held(Scancode::E),
            look_up: held(Scancode::Up),
            look_down: held(Scancode::Down),
            turn_right: held(Scancode::Right),
            turn_left: held(Scancode::Left),
        }
    }

    /// Uploads a frame and shows it. The image must match the window size.
    pub fn present(&mut self, image: &ImageBuffer) -> Result<(), String> {
        if (image.width(), image.height()) != (self.width, self.height) {
            return Err(format!(
                "frame is {}x{} but the window is {}x{}",
                image.width(),
                image.height(),
                self.width,
                self.height
            ));
        }

        let row_len = self.width as usize * 3;
        let pixels = image.as_bytes();
        self.texture.with_lock(None, |buffer, pitch| {
            for (dst, src) in buffer.chunks_mut(pitch).zip(pixels.chunks_exact(row_len)) {
                dst[..row_len].copy_from_slice(src);
            }
        })?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Recreates the frame texture for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        debug!("window resized to {width}x{height}");
        self.texture = frame_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn frame_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, String> {
    // SAFETY: the creator is boxed, so its address is stable, and it lives in
    // the same `Window` as the texture, whose field is dropped first.
    let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
        .map_err(|e| e.to_string())
}
