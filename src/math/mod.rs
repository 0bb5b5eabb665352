mod aabb;
mod color;
pub mod curve;
mod random;

pub use aabb::AABB;
pub use color::{average, hex_to_rgb, hsl_to_rgb, luminance, mix, Rgb, CYAN, MAGENTA, YELLOW};
pub use curve::{CatmullRom, CubicBezier, Curve, Path, QuadraticBezier};
pub use random::SceneRng;
