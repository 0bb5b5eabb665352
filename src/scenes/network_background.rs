use glam::Vec3;

use super::common::{log_built, segment};
use crate::math::{average, hex_to_rgb, Rgb, SceneRng};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph};
use crate::traits::SceneBuilder;

pub const NODE_COUNT: usize = 100;
pub const MAX_LINK_DISTANCE: f32 = 20.0;

const PALETTE: [u32; 3] = [0xff5500, 0x00ccff, 0xffffff];

/// Opacity of a link between nodes `distance` apart, `None` past the cutoff
pub fn link_opacity(distance: f32) -> Option<f32> {
    (distance < MAX_LINK_DISTANCE).then(|| (1.0 - distance / MAX_LINK_DISTANCE) * 0.5)
}

/// Wide field of glowing nodes linked by proximity
pub struct NetworkBackground;

impl SceneBuilder for NetworkBackground {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("network background");
        let palette = PALETTE.map(hex_to_rgb);

        let mut nodes: Vec<(NodeId, Vec3, Rgb)> = Vec::with_capacity(NODE_COUNT);
        for i in 0..NODE_COUNT {
            let color = *rng.pick(&palette);
            let position = rng.in_box(Vec3::new(80.0, 50.0, 30.0));

            let node = graph.add_child(
                group,
                NodeKind::mesh(Geometry::sphere(0.2, 16, 16), Material::basic_rgb(color, 0.8)),
                "node",
            );
            graph.set_position(node, position);
            graph.animate(
                node,
                Motion::Drift {
                    speed: 0.5,
                    phase: i as f32,
                    step: 0.01,
                },
            );

            let glow = graph.add_child(
                node,
                NodeKind::mesh(Geometry::sphere(0.3, 16, 16), Material::basic_rgb(color, 0.3)),
                "glow",
            );
            graph.animate(
                glow,
                Motion::Breathe {
                    frequency: 2.0,
                    phase: i as f32,
                    depth: 0.2,
                },
            );

            nodes.push((node, position, color));
        }

        let mut links = 0;
        for i in 0..NODE_COUNT {
            for j in i + 1..NODE_COUNT {
                let (from, a, color_a) = nodes[i];
                let (to, b, color_b) = nodes[j];
                let Some(opacity) = link_opacity(a.distance(b)) else {
                    continue;
                };

                let link = segment(
                    graph,
                    group,
                    a,
                    b,
                    Material::line_rgb(average(color_a, color_b), opacity),
                    "link",
                );
                graph.animate(link, Motion::Tether { from, to });
                graph.animate(
                    link,
                    Motion::Flicker {
                        base: opacity,
                        speed: 1.5,
                        phase: links as f32,
                    },
                );
                links += 1;
            }
        }

        graph.set_position(group, Vec3::Z * -40.0);
        graph.animate(group, Motion::spin_y(0.0005));

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "network background"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_falls_off_with_distance() {
        assert_eq!(link_opacity(0.0), Some(0.5));
        assert_eq!(link_opacity(10.0), Some(0.25));
        assert_eq!(link_opacity(20.0), None);
    }

    #[test]
    fn links_match_pairwise_distances() {
        let mut graph = SceneGraph::new();
        let root = NetworkBackground.build(&mut graph, &mut SceneRng::seeded(99));

        let positions: Vec<Vec3> = graph
            .find_all("node")
            .map(|id| graph.node(id).unwrap().transform.position)
            .collect();
        assert_eq!(positions.len(), NODE_COUNT);

        let mut expected = 0;
        for i in 0..NODE_COUNT {
            for j in i + 1..NODE_COUNT {
                if positions[i].distance(positions[j]) < MAX_LINK_DISTANCE {
                    expected += 1;
                }
            }
        }
        assert_eq!(graph.find_all("link").count(), expected);
        assert_eq!(graph.children(root).len(), NODE_COUNT + expected);
    }
}
