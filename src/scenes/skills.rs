use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::common::{log_built, polar, segment, slot_angle, tumble_rate};
use crate::math::{SceneRng, CYAN, MAGENTA, YELLOW};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;

pub const SPOKE_COUNT: usize = 8;
pub const BAR_COUNT: usize = 7;
pub const SCATTER_COUNT: usize = 20;
pub const RACK_COUNT: usize = 5;
pub const SYMBOL_COUNT: usize = 10;

const BAR_WIDTH: f32 = 0.5;
const BAR_GAP: f32 = 0.3;

/// Three small holograms standing for networking, data and cloud work
pub struct SkillElements;

impl SkillElements {
    /// Wireframe hub with spokes ending in small nodes
    fn network_node(graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let group = graph.add_group("network node");
        graph.add_child(
            group,
            NodeKind::mesh(Geometry::sphere(1.5, 32, 32), Material::glowing(CYAN, 0.3, 0.7).wireframe()),
            "hub",
        );

        for _ in 0..SPOKE_COUNT {
            let length = rng.spread(3.0, 2.0);
            let end = rng.direction() * length;
            segment(graph, group, Vec3::ZERO, end, Material::line(CYAN, 0.7), "spoke");
            let tip = graph.add_child(
                group,
                NodeKind::mesh(Geometry::sphere(0.3, 16, 16), Material::glowing(CYAN, 0.5, 1.0)),
                "spoke tip",
            );
            graph.set_position(tip, end);
        }

        graph.set_position(group, Vec3::new(-20.0, 5.0, -10.0));
        graph.animate(group, Motion::spin_y(0.005));
        group
    }

    /// Bar chart, scatter points and a circular axis
    fn data_visualization(graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let group = graph.add_group("data visualization");
        let total_width = BAR_COUNT as f32 * (BAR_WIDTH + BAR_GAP);

        for i in 0..BAR_COUNT {
            let height = rng.spread(1.0, 4.0);
            let bar = graph.add_child(
                group,
                NodeKind::mesh(
                    Geometry::cuboid(BAR_WIDTH, height, BAR_WIDTH),
                    Material::glowing(MAGENTA, 0.3, 0.7),
                ),
                "bar",
            );
            graph.set_position(
                bar,
                Vec3::new(i as f32 * (BAR_WIDTH + BAR_GAP) - total_width / 2.0, height / 2.0, 0.0),
            );
        }

        for _ in 0..SCATTER_COUNT {
            let position = Vec3::new(rng.centered(6.0), 3.0 + rng.centered(3.0), rng.centered(6.0));
            let point = graph.add_child(
                group,
                NodeKind::mesh(Geometry::sphere(0.15, 16, 16), Material::glowing(MAGENTA, 0.5, 1.0)),
                "scatter point",
            );
            graph.set_position(point, position);
        }

        let axis = graph.add_child(
            group,
            NodeKind::mesh(Geometry::torus(3.0, 0.05, 16, 50), Material::basic(MAGENTA, 0.5)),
            "axis",
        );
        graph.place(
            axis,
            Transform::at(Vec3::Y * 3.0).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        );

        graph.set_position(group, Vec3::new(20.0, 5.0, -10.0));
        graph.animate(group, Motion::spin_y(0.005));
        group
    }

    /// Platform with a ring of racks and hovering symbols
    fn cloud_infrastructure(graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let group = graph.add_group("cloud infrastructure");
        graph.add_child(
            group,
            NodeKind::mesh(Geometry::cylinder(4.0, 4.0, 0.5, 32), Material::glowing(YELLOW, 0.2, 0.5)),
            "platform",
        );

        for i in 0..RACK_COUNT {
            let angle = slot_angle(i, RACK_COUNT);
            let position = polar(angle, 2.0, 1.0);
            let rack = graph.add_child(
                group,
                NodeKind::mesh(Geometry::cuboid(0.8, 1.5, 0.8), Material::glowing(YELLOW, 0.3, 0.7)),
                "rack",
            );
            graph.place(rack, Transform::at(position).with_rotation(Vec3::new(0.0, -angle, 0.0)));
            segment(
                graph,
                group,
                Vec3::new(position.x, 0.5, position.z),
                Vec3::Y * 0.5,
                Material::line(YELLOW, 0.5),
                "cable",
            );
        }

        let symbols = [
            Geometry::octahedron(0.3, 0),
            Geometry::tetrahedron(0.3, 0),
            Geometry::icosahedron(0.3, 0),
        ];
        for _ in 0..SYMBOL_COUNT {
            let geometry = rng.pick(&symbols).clone();
            let angle = rng.angle();
            let radius = rng.spread(3.0, 1.0);
            let position = polar(angle, radius, rng.spread(2.0, 2.0));
            let speed = rng.spread(0.005, 0.01);
            let phase = rng.angle();
            let rate = tumble_rate(rng, 0.01);

            let symbol = graph.add_child(
                group,
                NodeKind::mesh(geometry, Material::glowing(YELLOW, 0.5, 0.7).wireframe()),
                "symbol",
            );
            graph.set_position(symbol, position);
            graph.animate(symbol, Motion::Spin { rate });
            graph.animate(
                symbol,
                Motion::Hover {
                    origin: position,
                    speed,
                    amplitude: 0.3,
                    phase,
                },
            );
        }

        graph.set_position(group, Vec3::new(0.0, 15.0, -20.0));
        graph.animate(group, Motion::spin_y(0.002));
        group
    }
}

impl SceneBuilder for SkillElements {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("skill elements");

        let parts = [
            Self::network_node(graph, rng),
            Self::data_visualization(graph, rng),
            Self::cloud_infrastructure(graph, rng),
        ];
        for part in parts {
            graph.attach(group, part);
        }

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "skill elements"
    }
}
