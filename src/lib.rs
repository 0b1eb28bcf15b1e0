pub mod altar;
pub mod app;
pub mod audio;
pub mod camera;
pub mod clock;
pub mod collectible;
pub mod companion;
pub mod config;
pub mod cutscene;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod palette;
pub mod particles;
pub mod player;
pub mod portal;
pub mod projectile;
pub mod renderer;
pub mod resolver;
pub mod scene;
pub mod snapshot;
pub mod timer;
pub mod tuning;
pub mod world_map;

pub use error::{Error, Result};
