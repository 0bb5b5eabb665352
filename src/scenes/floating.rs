use glam::Vec3;

use super::common::{log_built, segment, tumble_rate};
use super::particles::DataFlowParticles;
use crate::math::{hsl_to_rgb, SceneRng, CYAN};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;

pub const SHAPE_COUNT: usize = 20;
pub const NODE_COUNT: usize = 15;

/// Bright tumbling shapes, a loose hovering network and data-flow dust
pub struct FloatingElements;

impl FloatingElements {
    fn shapes(graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let group = graph.add_group("floating shapes");
        let geometries = [
            Geometry::icosahedron(1.0, 0),
            Geometry::tetrahedron(1.0, 0),
            Geometry::octahedron(1.0, 0),
            Geometry::torus(1.0, 0.3, 16, 32),
            Geometry::cuboid(1.0, 1.0, 1.0),
        ];

        for _ in 0..SHAPE_COUNT {
            let geometry = rng.pick(&geometries).clone();
            let color = hsl_to_rgb(rng.unit(), 0.8, 0.6);
            let position = rng.in_shell(20.0, 30.0);
            let rotation = Vec3::new(rng.angle(), rng.angle(), rng.angle());
            let scale = rng.spread(0.5, 2.0);
            let rate = tumble_rate(rng, 0.005);
            let speed = rng.spread(0.001, 0.003);
            let amplitude = rng.spread(0.5, 1.5);
            let phase = rng.angle();

            let shape = graph.add_child(
                group,
                NodeKind::mesh(geometry, Material::phong_rgb(color, color, 0.5, 0.7).shininess(100.0)),
                "floating shape",
            );
            graph.place(
                shape,
                Transform::at(position)
                    .with_rotation(rotation)
                    .with_scale(Vec3::splat(scale)),
            );
            graph.animate(shape, Motion::Spin { rate });
            graph.animate(
                shape,
                Motion::Hover {
                    origin: position,
                    speed,
                    amplitude,
                    phase,
                },
            );
        }

        group
    }

    /// Hovering nodes joined by random links that follow them
    fn network(graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let group = graph.add_group("floating network");

        let mut nodes = Vec::with_capacity(NODE_COUNT);
        for _ in 0..NODE_COUNT {
            let position = rng.in_shell(20.0, 20.0);
            let speed = rng.spread(0.001, 0.002);
            let amplitude = rng.spread(0.3, 1.0);
            let phase = rng.angle();

            let node = graph.add_child(
                group,
                NodeKind::mesh(Geometry::sphere(0.3, 16, 16), Material::glowing(CYAN, 0.7, 1.0)),
                "network node",
            );
            graph.set_position(node, position);
            graph.animate(
                node,
                Motion::Hover {
                    origin: position,
                    speed,
                    amplitude,
                    phase,
                },
            );
            nodes.push((node, position));
        }

        for i in 0..NODE_COUNT {
            let links = rng.count(2, 2);
            for _ in 0..links {
                let target = rng.index(NODE_COUNT);
                if target == i {
                    continue;
                }
                let (from, start) = nodes[i];
                let (to, end) = nodes[target];
                let link = segment(graph, group, start, end, Material::line(CYAN, 0.3), "network link");
                graph.animate(link, Motion::Tether { from, to });
            }
        }

        group
    }
}

impl SceneBuilder for FloatingElements {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("floating elements");

        let shapes = Self::shapes(graph, rng);
        let network = Self::network(graph, rng);
        let dust = DataFlowParticles.build(graph, rng);
        for part in [shapes, network, dust] {
            graph.attach(group, part);
        }

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "floating elements"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_never_loop_back() {
        let mut graph = SceneGraph::new();
        FloatingElements.build(&mut graph, &mut SceneRng::seeded(21));

        let links: Vec<_> = graph.find_all("network link").collect();
        assert!(links.len() <= NODE_COUNT * 3);
        for link in links {
            let node = graph.node(link).unwrap();
            match node.motions[0] {
                Motion::Tether { from, to } => assert_ne!(from, to),
                ref other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn shapes_sit_in_their_shell() {
        let mut graph = SceneGraph::new();
        FloatingElements.build(&mut graph, &mut SceneRng::seeded(21));
        let shapes: Vec<_> = graph.find_all("floating shape").collect();
        assert_eq!(shapes.len(), SHAPE_COUNT);
        for id in shapes {
            let t = graph.node(id).unwrap().transform;
            let r = t.position.length();
            assert!(r >= 20.0 - 1e-3 && r < 50.0 + 1e-3);
            assert_eq!(t.scale.x, t.scale.y);
        }
    }
}
