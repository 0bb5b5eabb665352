use std::f32::consts::PI;

use glam::Vec3;

use super::common::{log_built, segment};
use crate::math::{hex_to_rgb, Rgb, SceneRng};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;

pub const MAX_LINK_DISTANCE: f32 = 4.0;

/// Pink, blue/purple and light blue first; orange and purple are the rare picks
const PALETTE: [u32; 5] = [0xff5b99, 0x5b4fff, 0x5bc2ff, 0xff9d5b, 0xc45bff];

/// One arc of nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub count: usize,
    /// Arc angle is `(t * arc_span + arc_start) * PI * direction` for `t = i / count`
    pub arc_span: f32,
    pub arc_start: f32,
    pub base_radius: f32,
    pub radius_jitter: f32,
    pub z_extent: f32,
    pub x_offset: f32,
    pub position: Vec3,
    pub scale: f32,
    pub direction: f32,
}

pub const SECTIONS: [Section; 3] = [
    Section {
        count: 140,
        arc_span: 2.0,
        arc_start: 0.25,
        base_radius: 15.0,
        radius_jitter: 5.0,
        z_extent: 5.0,
        x_offset: 0.0,
        position: Vec3::new(-5.0, 5.0, -10.0),
        scale: 1.0,
        direction: 1.0,
    },
    Section {
        count: 120,
        arc_span: 2.0,
        arc_start: 1.75,
        base_radius: 15.0,
        radius_jitter: 5.0,
        z_extent: 5.0,
        x_offset: 0.0,
        position: Vec3::new(5.0, -5.0, -10.0),
        scale: 0.8,
        direction: -1.0,
    },
    Section {
        count: 80,
        arc_span: 0.5,
        arc_start: 0.5,
        base_radius: 10.0,
        radius_jitter: 3.0,
        z_extent: 3.0,
        x_offset: 10.0,
        position: Vec3::new(10.0, 0.0, -5.0),
        scale: 0.5,
        direction: 1.0,
    },
];

impl Section {
    fn place(&self, i: usize, rng: &mut SceneRng) -> Vec3 {
        let t = i as f32 / self.count as f32;
        let angle = (t * self.arc_span + self.arc_start) * PI * self.direction;
        let radius = self.base_radius * self.scale + rng.unit() * self.radius_jitter;
        let z = rng.centered(self.z_extent);
        Vec3::new(angle.cos() * radius + self.x_offset, angle.sin() * radius, z)
    }

    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng, palette: &[Rgb; 5]) -> NodeId {
        let group = graph.add_group("section");

        let mut nodes: Vec<(Vec3, Rgb)> = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let position = self.place(i, rng);
            let radius = rng.spread(0.1, 0.15);
            let color = if rng.unit() < 0.7 {
                palette[rng.index(3)]
            } else {
                palette[3 + rng.index(2)]
            };

            let node = graph.add_child(
                group,
                NodeKind::mesh(Geometry::sphere(radius, 16, 16), Material::basic_rgb(color, 0.9)),
                "node",
            );
            graph.set_position(node, position);
            graph.add_child(
                node,
                NodeKind::mesh(Geometry::sphere(radius * 2.0, 16, 16), Material::basic_rgb(color, 0.2)),
                "glow",
            );
            nodes.push((position, color));
        }

        for (i, &(a, color)) in nodes.iter().enumerate() {
            let budget = rng.count(2, 2);
            let mut linked = 0;
            for (j, &(b, _)) in nodes.iter().enumerate() {
                if i == j || linked >= budget {
                    continue;
                }
                if a.distance(b) < MAX_LINK_DISTANCE {
                    segment(graph, group, a, b, Material::line_rgb(color, 0.3), "link");
                    linked += 1;
                }
            }
        }

        graph.place(group, Transform::at(self.position).with_scale(Vec3::splat(self.scale)));
        graph.animate(
            group,
            Motion::Spin {
                rate: Vec3::Z * (0.0005 * self.direction),
            },
        );
        graph.animate(
            group,
            Motion::Drift {
                speed: 0.001,
                phase: 0.0,
                step: 0.01 * 0.2,
            },
        );
        group
    }
}

/// Three curved arcs of small linked nodes on a light background
pub struct Constellation;

impl SceneBuilder for Constellation {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let root = graph.add_group("constellation");
        let palette = PALETTE.map(hex_to_rgb);

        for section in &SECTIONS {
            let id = section.build(graph, rng, &palette);
            graph.attach(root, id);
        }

        log_built(self.name(), graph, before);
        root
    }

    fn name(&self) -> &str {
        "constellation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_counts_per_section() {
        let mut graph = SceneGraph::new();
        let root = Constellation.build(&mut graph, &mut SceneRng::seeded(12));
        let sections = graph.children(root);
        assert_eq!(sections.len(), 3);
        for (&id, section) in sections.iter().zip(SECTIONS.iter()) {
            let nodes = graph
                .children(id)
                .iter()
                .filter(|&&c| graph.node(c).unwrap().name == "node")
                .count();
            assert_eq!(nodes, section.count);
        }
    }

    #[test]
    fn every_node_has_a_double_size_glow() {
        let mut graph = SceneGraph::new();
        Constellation.build(&mut graph, &mut SceneRng::seeded(12));
        for id in graph.find_all("node") {
            let NodeKind::Mesh {
                geometry: Geometry::Sphere { radius, .. },
                ..
            } = graph.node(id).unwrap().kind
            else {
                panic!("node should be a sphere");
            };
            let glow = graph.children(id)[0];
            let NodeKind::Mesh {
                geometry: Geometry::Sphere { radius: glow_radius, .. },
                material,
            } = &graph.node(glow).unwrap().kind
            else {
                panic!("glow should be a sphere");
            };
            assert!((glow_radius - radius * 2.0).abs() < 1e-6);
            assert_eq!(material.opacity(), 0.2);
        }
    }
}
