use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use pixel_surface::cli::Cli;
use pixel_surface::{DisplayContext, Pixel, SurfaceConfig};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

// === Application ===

struct App {
    config: SurfaceConfig,
    display: Option<DisplayContext>,
    start: Instant,
    last_frame_time: Instant,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
    failed: bool,
}

impl App {
    fn new(config: SurfaceConfig) -> Self {
        let now = Instant::now();
        Self {
            config,
            display: None,
            start: now,
            last_frame_time: now,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
            failed: false,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        let time = self.start.elapsed().as_secs_f32();
        let fps = self.fps;
        let Some(display) = &mut self.display else {
            return;
        };

        paint_plasma(display.pixels_mut(), time);
        display.label_mut().set_text(format!("{:.0} FPS", fps));
        if let Err(e) = display.present() {
            log::warn!("Render error: {}", e);
        }
        display.frame_limiter_mut().advance(now);
    }
}

/// Animated test pattern so there is something to look at
fn paint_plasma(pixels: &mut pixel_surface::PixelBuffer, time: f32) {
    let (width, height) = (pixels.width(), pixels.height());
    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let wave = ((u * 10.0 + time).sin() + (v * 8.0 - time * 0.7).cos()) * 0.25 + 0.5;
            pixels.put(
                x,
                y,
                Pixel::rgb(
                    (wave * 255.0) as u8,
                    (u * 255.0) as u8,
                    ((1.0 - wave) * 255.0) as u8,
                ),
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.display.is_some() {
            return;
        }

        let config = &self.config;
        match DisplayContext::create(
            event_loop,
            &config.title,
            config.width,
            config.height,
            &config.text,
        ) {
            Ok(display) => self.display = Some(display),
            Err(e) => {
                log::error!("Failed to create display: {}", e);
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(display) = &mut self.display {
            if display.handle_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(display) = self.display.take() {
                    display.destroy();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(display) = &self.display {
            let limiter = display.frame_limiter();
            if limiter.is_due(Instant::now()) {
                display.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(limiter.deadline()));
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SurfaceConfig::from_json_file(path)?,
        None => SurfaceConfig::default(),
    };
    let config = cli.apply(config);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);

    log::info!("Escape to quit");
    event_loop.run_app(&mut app)?;

    if app.failed {
        anyhow::bail!("could not create GUI");
    }
    Ok(())
}
