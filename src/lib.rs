pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod math;
pub mod post;
pub mod render;
pub mod scene;
pub mod scenes;
pub mod traits;
pub mod types;
pub mod uniforms;

pub use animation::{AnimationDriver, FrameTime};
pub use config::Config;
pub use scene::SceneGraph;
pub use scenes::Showcase;
pub use traits::SceneBuilder;
pub use uniforms::UniformFeed;
