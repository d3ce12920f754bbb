//! Grid raycasting renderer: marches one ray per screen column through an
//! occupancy map for walls, floor-casts every pixel below the horizon, and
//! moves the camera with wall sliding.

pub mod camera;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod game;
pub mod map;
pub mod mapgen;
pub mod movement;
pub mod raycast;
pub mod renderer;
pub mod texture;

pub use camera::Camera;
pub use config::{EngineConfig, MoveConfig, RenderConfig};
pub use error::ConfigError;
pub use framebuffer::FrameBuffer;
pub use game::{Game, GameEvent};
pub use map::{Map, Rgb};
pub use movement::MoveInput;
pub use texture::{Texture, TextureStore};
