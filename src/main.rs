use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use raycast_maze::mapgen::random_map;
use raycast_maze::{ConfigError, EngineConfig, Game, MoveInput, TextureStore};

use crate::hud::Notifications;
use crate::scaler::{ScaleLut, blit_letterboxed, build_scale_lut};

mod hud;
mod scaler;

const MAP_SIZE: usize = 25;
const MAX_DT: Duration = Duration::from_millis(100);
const BORDER: u32 = 0;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    game: Game,
    notes: Notifications,
    title: String,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal frame, packed row-major for the blit
    fb_packed: Vec<u32>,
    scale_lut: ScaleLut,

    // Input
    keys_down: HashSet<KeyCode>,
    pointer_dx: f32,
    attack_down: bool,
    last_tick: Instant,
}

impl App {
    fn new(seed: u64, textured_walls: bool) -> Result<Self, ConfigError> {
        let mut config = EngineConfig::default();
        config.render.textured_walls = textured_walls;
        let mut rng = StdRng::seed_from_u64(seed);
        let level = random_map(MAP_SIZE, &mut rng)?;
        let textures = TextureStore::procedural(config.render.vres())?;
        let game = Game::new(level.map, level.start, textures, config)?;

        let now = Instant::now();
        let mut notes = Notifications::new(now);
        notes.push("Find the exit!", now);

        let fb_len = game.frame().width() * game.frame().height();
        Ok(Self {
            window: None,
            surface: None,
            game,
            notes,
            title: String::new(),
            frame_counter: 0,
            last_fps_print: now,
            fb_packed: vec![0; fb_len],
            scale_lut: ScaleLut::empty(),
            keys_down: HashSet::new(),
            pointer_dx: 0.0,
            attack_down: false,
            last_tick: now,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Raycast Maze")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            log::warn!("pointer grab unavailable, turning needs the cursor inside the window");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        self.rebuild_scale_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window.clone());

        self.last_tick = Instant::now();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if code == KeyCode::Escape {
                        event_loop.exit();
                    }
                    // ignore key repeat so one press flips once
                    if code == KeyCode::KeyT && !self.keys_down.contains(&code) {
                        let on = !self.game.textured_walls();
                        self.game.set_textured_walls(on);
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.attack_down = state == ElementState::Pressed;
            }

            WindowEvent::RedrawRequested => {
                self.tick();

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let dw = size.width as usize;
                let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return; // Minimized window, skip drawing
                };

                if let Err(err) = surface.resize(nw, nh) {
                    log::error!("surface resize failed: {err}");
                    return;
                }

                let frame = self.game.render();
                frame.pack_rows(&mut self.fb_packed);

                let mut buf = match surface.buffer_mut() {
                    Ok(buf) => buf,
                    Err(err) => {
                        log::error!("surface buffer unavailable: {err}");
                        return;
                    }
                };
                blit_letterboxed(
                    &mut buf,
                    dw,
                    &self.fb_packed,
                    frame.width(),
                    &self.scale_lut,
                    BORDER,
                );
                if let Err(err) = buf.present() {
                    log::error!("present failed: {err}");
                }

                window.request_redraw();
                self.print_fps();
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("resized to {}x{}", new_size.width, new_size.height);
                self.rebuild_scale_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.pointer_dx += delta.0 as f32;
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(MAX_DT);
        self.last_tick = now;

        let down = |k: KeyCode| self.keys_down.contains(&k);
        let input = MoveInput {
            forward: down(KeyCode::KeyW),
            backward: down(KeyCode::KeyS),
            strafe_left: down(KeyCode::KeyA),
            strafe_right: down(KeyCode::KeyD),
            attack: self.attack_down || down(KeyCode::Space),
            turn_delta: self.pointer_dx,
        };
        self.pointer_dx = 0.0;

        for &event in self.game.update(&input, dt.as_secs_f32()) {
            self.notes.on_event(event, now);
        }
        self.notes.update(now);
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        let cam = self.game.camera();
        let title = match self.notes.current() {
            Some(msg) => format!("Raycast Maze | {msg}"),
            None => format!(
                "Raycast Maze | ({:.1}, {:.1}) {:.0}°",
                cam.pos[0],
                cam.pos[1],
                cam.heading_degrees()
            ),
        };
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn print_fps(&mut self) {
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!(
                "FPS: {:.1} ({} frames total)",
                self.frame_counter as f32 / elapsed,
                self.game.frames()
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }

    fn rebuild_scale_lut(&mut self, dst_w: usize, dst_h: usize) {
        let frame = self.game.frame();
        self.scale_lut = build_scale_lut(dst_w, dst_h, frame.width(), frame.height());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // usage: raycast-maze [--textured] [seed]
    let mut textured_walls = false;
    let mut seed = None;
    for arg in std::env::args().skip(1) {
        if arg == "--textured" {
            textured_walls = true;
        } else if let Ok(n) = arg.parse::<u64>() {
            seed = Some(n);
        } else {
            log::warn!("ignoring argument {arg:?}");
        }
    }
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("map seed {seed}, textured walls {textured_walls} (T toggles)");

    let mut app = match App::new(seed, textured_walls) {
        Ok(app) => app,
        Err(err) => {
            log::error!("failed to load level: {err}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("failed to create event loop: {err}");
            std::process::exit(1);
        }
    };

    // ControlFlow::Poll continuously runs the event loop, even if the OS hasn't
    // dispatched any events. This is ideal for games and similar applications.
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {err}");
    }
}
