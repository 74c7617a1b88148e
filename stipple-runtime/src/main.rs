use std::fmt::Display;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use eyre::WrapErr;
use stipple::config::Config;
use stipple::driver::Painter;
use stipple::layout::{overlaps, Point, Rect, Size};
use stipple::render::FrameBuffer;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Target time between frames
const FRAME: Duration = Duration::from_micros(16_667);

/// softbuffer's error can carry a non-`Send` platform error;
/// we keep its message so it fits in an `eyre::Report`
#[derive(Debug)]
struct SurfaceError(String);
impl Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SurfaceError: {}", self.0)
    }
}
impl std::error::Error for SurfaceError {}
impl From<softbuffer::SoftBufferError> for SurfaceError {
    fn from(value: softbuffer::SoftBufferError) -> Self {
        Self(value.to_string())
    }
}

/// Everything the event loop closure owns
struct App {
    window: Window,
    surface: softbuffer::Surface,
    frame: FrameBuffer,
    painter: Painter,
    config: Config,

    /// `None` while the pointer is outside the window
    cursor: Option<Point>,
    /// `[left, middle, right]`, as last reported by the window
    buttons: [bool; 3],
}
impl App {
    fn press(&mut self, button: MouseButton, state: ElementState) {
        let index = match button {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            _ => return,
        };
        self.buttons[index] = state == ElementState::Pressed;
    }

    /// One frame of input: sample the pointer, feed the canvas
    fn tick(&mut self) {
        match self.cursor {
            Some(cursor) => self.painter.frame(cursor, self.buttons),
            None => self.painter.pointer_lost(self.buttons),
        };
        if !self.painter.canvas.dirty().is_empty() {
            self.window.request_redraw();
        }
    }

    fn redraw(&mut self) -> eyre::Result<()> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            log::warn!("window has no area, skipping frame");
            return Ok(());
        };

        let size = Size::new(size.width, size.height);
        if self.frame.size != size {
            log::info!("resized to {}x{}", size.width, size.height);
            self.frame.reset(size, self.config.window_color);
            self.painter.canvas.invalidate();
        }
        self.surface
            .resize(width, height)
            .map_err(SurfaceError::from)
            .wrap_err("resizing surface")?;

        let canvas = &mut self.painter.canvas;
        let mut handle = self.frame.handle(canvas.origin(), canvas.scale());
        let painted = canvas.render(&mut handle);
        log::trace!("painted {painted} cells");

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(SurfaceError::from)
            .wrap_err("acquiring frame buffer")?;
        buffer.copy_from_slice(&self.frame.pixels);
        buffer
            .present()
            .map_err(SurfaceError::from)
            .wrap_err("presenting frame")?;
        Ok(())
    }
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(std::env::args().skip(1))?;

    let event_loop = EventLoop::new().wrap_err("creating event loop")?;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
        .build(&event_loop)
        .wrap_err("creating window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(SurfaceError::from)
        .wrap_err("creating softbuffer context")?;
    let surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(SurfaceError::from)
        .wrap_err("creating softbuffer surface")?;

    let canvas = config.canvas();
    let size = canvas.size();
    log::info!(
        "canvas {}x{} at {} with scale {}",
        size.width,
        size.height,
        canvas.origin(),
        canvas.scale()
    );
    let window_rect = Rect::new(0, 0, config.window_width as i32, config.window_height as i32);
    if !overlaps(canvas.bounds(), window_rect) {
        log::warn!("canvas at {:?} is entirely outside the window", canvas.bounds());
    }
    let mut app = App {
        window,
        surface,
        frame: FrameBuffer::new(config.window_size(), config.window_color),
        painter: Painter::new(canvas, config.paint_color),
        config,
        cursor: None,
        buttons: [false; 3],
    };

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent { window_id, event } if window_id == app.window.id() => {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    logical_key: Key::Named(NamedKey::Escape),
                                    state: ElementState::Pressed,
                                    ..
                                },
                            ..
                        } => elwt.exit(),

                        WindowEvent::CursorMoved { position, .. } => {
                            app.cursor = Some(Point::new(position.x as i32, position.y as i32));
                        }
                        WindowEvent::CursorLeft { .. } => app.cursor = None,
                        WindowEvent::MouseInput { state, button, .. } => app.press(button, state),
                        WindowEvent::Resized(_) => app.window.request_redraw(),

                        WindowEvent::RedrawRequested => {
                            if let Err(report) = app.redraw() {
                                log::error!("{report:?}");
                                elwt.exit();
                            }
                        }
                        _ => (),
                    }
                }
                Event::AboutToWait => {
                    app.tick();
                    elwt.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME));
                }
                _ => (),
            }
        })
        .wrap_err("running event loop")
}
