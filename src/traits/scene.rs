use crate::math::SceneRng;
use crate::scene::{NodeId, SceneGraph};

/// Procedural construction of one decorative structure
pub trait SceneBuilder {
    /// Synthesize the subtree, attach its motions and return its root
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId;

    /// Get builder name for logging
    fn name(&self) -> &str {
        "Scene"
    }
}
