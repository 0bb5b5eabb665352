mod batch;
mod renderer;
mod snapshot;
mod tessellate;

pub use batch::{FrameBatch, MeshCache, ShellBatch, SpriteBatch};
pub use renderer::{Overlay, Renderer, DEPTH_FORMAT, HDR_FORMAT};
pub use snapshot::{NodeState, SceneSnapshot};
pub use tessellate::{grid_lines, tessellate, Mesh};
