mod geometry;
mod graph;
mod material;
mod motion;
mod transform;

pub use geometry::Geometry;
pub use graph::{Node, NodeId, NodeKind, PointCloud, SceneGraph, SceneStats};
pub use material::{Blending, Material, Phong, PointSprites, ShaderMaterial, Side, Surface};
pub use motion::Motion;
pub use transform::Transform;
