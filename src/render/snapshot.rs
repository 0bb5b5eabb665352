use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::animation::FrameTime;
use crate::math::AABB;
use crate::scene::{NodeId, SceneGraph, SceneStats};
use crate::scenes::Showcase;

/// State of one animated node at capture time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeState {
    pub id: NodeId,
    pub name: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub opacity: Option<f32>,
}

/// Headless run summary written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub showcase: Showcase,
    pub seed: u64,
    pub frames: u64,
    pub elapsed: f32,
    pub stats: SceneStats,
    /// World-space bounds of every node origin
    pub bounds: Option<AABB>,
    pub animated: Vec<NodeState>,
}

impl SceneSnapshot {
    pub fn capture(graph: &SceneGraph, showcase: Showcase, seed: u64, frames: u64, time: FrameTime) -> Self {
        let animated = graph
            .animated()
            .iter()
            .filter_map(|&id| {
                let node = graph.node(id)?;
                Some(NodeState {
                    id,
                    name: node.name.clone(),
                    position: node.transform.position.to_array(),
                    rotation: node.transform.rotation.to_array(),
                    scale: node.transform.scale.to_array(),
                    opacity: node.kind.material().map(|m| m.opacity()),
                })
            })
            .collect();

        let origins: Vec<_> = graph
            .walk()
            .map(|id| graph.world_matrix(id).w_axis.truncate())
            .collect();

        Self {
            showcase,
            seed,
            frames,
            elapsed: time.elapsed,
            stats: graph.stats(),
            bounds: AABB::from_points(&origins),
            animated,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize snapshot")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write snapshot {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Motion;

    #[test]
    fn captures_animated_nodes_only() {
        let mut graph = SceneGraph::new();
        let still = graph.add_group("still");
        let spinner = graph.add_group("spinner");
        graph.animate(spinner, Motion::spin_y(0.1));
        graph.set_position(still, glam::Vec3::ONE);

        let snapshot = SceneSnapshot::capture(&graph, Showcase::Holodeck, 5, 10, FrameTime::fixed(10, 60.0));
        assert_eq!(snapshot.animated.len(), 1);
        assert_eq!(snapshot.animated[0].name, "spinner");
        assert_eq!(snapshot.animated[0].opacity, None);
        assert_eq!(snapshot.bounds, Some(AABB::new(glam::Vec3::ZERO, glam::Vec3::ONE)));

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"showcase\": \"holodeck\""));
        assert!(json.contains("\"seed\": 5"));
    }
}
