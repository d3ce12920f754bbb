//! Per-frame context: owns the level, the camera and the frame, and runs
//! movement then rendering once per tick.

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::framebuffer::FrameBuffer;
use crate::map::Map;
use crate::movement::{self, MoveInput};
use crate::renderer;
use crate::texture::TextureStore;

/// Discrete things that happened during a frame's update, in the order
/// they were detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AttackTriggered,
    ExitReached,
}

pub struct Game {
    map: Map,
    camera: Camera,
    textures: TextureStore,
    frame: FrameBuffer,
    config: EngineConfig,

    events: Vec<GameEvent>,
    attack_held: bool,
    on_exit: bool,
    frames: u64,
}

impl Game {
    pub fn new(
        map: Map,
        start: Camera,
        textures: TextureStore,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let frame = FrameBuffer::new(config.render.hres, config.render.vres());
        log::info!(
            "level loaded: {0}x{0} map, start {1:?}, exit {2:?}, render {3}x{4}",
            map.size(),
            start.pos,
            map.exit(),
            frame.width(),
            frame.height()
        );

        Ok(Self {
            map,
            camera: start,
            textures,
            frame,
            config,
            events: Vec::new(),
            attack_held: false,
            // a start on the exit still reports it on the first update
            on_exit: false,
            frames: 0,
        })
    }

    /// Applies one frame of input and returns the events it produced.
    /// Must be called before [`Game::render`] for the same frame.
    pub fn update(&mut self, input: &MoveInput, dt: f32) -> &[GameEvent] {
        self.events.clear();

        if input.attack && !self.attack_held {
            self.events.push(GameEvent::AttackTriggered);
        }
        self.attack_held = input.attack;

        self.camera = movement::step(&self.camera, input, dt, &self.map, &self.config.movement);

        let on_exit = at_exit(&self.map, &self.camera);
        if on_exit && !self.on_exit {
            self.events.push(GameEvent::ExitReached);
        }
        self.on_exit = on_exit;

        for event in &self.events {
            log::debug!("frame {}: {:?}", self.frames, event);
        }
        &self.events
    }

    /// Renders the current camera view into the internal frame.
    pub fn render(&mut self) -> &FrameBuffer {
        renderer::render_frame(
            &mut self.frame,
            &self.map,
            &self.camera,
            &self.textures,
            &self.config.render,
        );
        self.frames += 1;
        &self.frame
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    #[inline]
    pub fn textured_walls(&self) -> bool {
        self.config.render.textured_walls
    }

    /// Switches between flat-shaded and textured wall bands from the next
    /// rendered frame on.
    pub fn set_textured_walls(&mut self, on: bool) {
        if on != self.config.render.textured_walls {
            log::info!("textured walls {}", if on { "on" } else { "off" });
        }
        self.config.render.textured_walls = on;
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn at_exit(map: &Map, camera: &Camera) -> bool {
    match (map.exit(), camera.cell()) {
        (Some(exit), Some(cell)) => exit == cell,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MoveConfig, RenderConfig};

    fn corridor_game() -> Game {
        let size = 6;
        let mut solid = vec![true; size * size];
        // open row y = 2 from x = 1 to 4
        for x in 1..5 {
            solid[2 * size + x] = false;
        }
        let map = Map::new(size, solid, vec![[0.7; 3]; size * size], Some((4, 2))).unwrap();
        let config = EngineConfig {
            render: RenderConfig {
                hres: 32,
                halfvres: 16,
                ..Default::default()
            },
            movement: MoveConfig {
                speed: 1.0,
                ..Default::default()
            },
        };
        let textures = TextureStore::procedural(32).unwrap();
        Game::new(map, Camera::new(1.5, 2.5, 0.0), textures, config).unwrap()
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let map = Map::walled(5, [1.0; 3]).unwrap();
        let textures = TextureStore::procedural(4).unwrap();
        let mut config = EngineConfig::default();
        config.render.halfvres = 0;
        let result = Game::new(map, Camera::new(2.5, 2.5, 0.0), textures, config);
        assert!(matches!(result, Err(ConfigError::InvalidSetting(_))));
    }

    #[test]
    fn test_attack_is_edge_triggered() {
        let mut game = corridor_game();
        let held = MoveInput {
            attack: true,
            ..Default::default()
        };
        assert_eq!(game.update(&held, 0.016), &[GameEvent::AttackTriggered]);
        assert!(game.update(&held, 0.016).is_empty());
        game.update(&MoveInput::default(), 0.016);
        assert_eq!(game.update(&held, 0.016), &[GameEvent::AttackTriggered]);
    }

    #[test]
    fn test_exit_reached_once() {
        let mut game = corridor_game();
        let input = MoveInput {
            forward: true,
            attack: true,
            ..Default::default()
        };
        let mut seen = Vec::new();
        for _ in 0..60 {
            seen.extend_from_slice(game.update(&input, 0.1));
            game.render();
        }
        // held inputs and standing on the exit do not repeat events
        assert_eq!(seen, vec![GameEvent::AttackTriggered, GameEvent::ExitReached]);
        assert_eq!(game.camera().cell(), Some((4, 2)));
        assert!(game.camera().pos[0] <= 5.0 - 0.2);
        assert_eq!(game.frames(), 60);
    }

    #[test]
    fn test_exit_under_start_fires_on_first_update() {
        let mut solid = vec![true; 9];
        solid[4] = false;
        let map = Map::new(3, solid, vec![[0.7; 3]; 9], Some((1, 1))).unwrap();
        let config = EngineConfig {
            render: RenderConfig {
                hres: 8,
                halfvres: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let textures = TextureStore::procedural(8).unwrap();
        let mut game = Game::new(map, Camera::new(1.5, 1.5, 0.0), textures, config).unwrap();

        let forward = MoveInput {
            forward: true,
            ..Default::default()
        };
        assert_eq!(game.update(&forward, 0.016), &[GameEvent::ExitReached]);
        assert!(game.update(&forward, 0.016).is_empty());
        assert!(game.update(&MoveInput::default(), 0.016).is_empty());
    }

    #[test]
    fn test_texture_toggle_changes_wall_band() {
        let mut game = corridor_game();
        assert!(!game.textured_walls());
        let flat = game.render().pixels().to_vec();

        game.set_textured_walls(true);
        assert!(game.textured_walls());
        let textured = game.render().pixels().to_vec();
        assert_ne!(flat, textured);

        game.set_textured_walls(false);
        assert_eq!(game.render().pixels(), &flat[..]);
    }

    #[test]
    fn test_render_reads_current_camera() {
        let mut game = corridor_game();
        let before = game.render().pixels().to_vec();
        game.update(
            &MoveInput {
                turn_delta: 30.0,
                ..Default::default()
            },
            0.016,
        );
        let after = game.render().pixels().to_vec();
        assert_ne!(before, after);
    }
}
