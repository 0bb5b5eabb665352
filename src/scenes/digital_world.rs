use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::common::{log_built, polar, segment, slot_angle};
use crate::math::{Curve, QuadraticBezier, SceneRng};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;
use crate::uniforms::ShaderProgram;

pub const ISLAND_COUNT: usize = 7;
pub const RING_COUNT: usize = 3;

const BEAM_SAG: f32 = 5.0;
const BEAM_SAMPLES: usize = 20;

/// Hex-shelled world of floating islands around a central tower
pub struct DigitalWorld;

impl DigitalWorld {
    /// Platform plus a handful of boxes standing on it
    fn island(graph: &mut SceneGraph, rng: &mut SceneRng, index: usize) -> NodeId {
        let island = graph.add_group(format!("island {}", index));

        let radius_top = rng.spread(3.0, 5.0);
        let radius_bottom = rng.spread(5.0, 7.0);
        let platform_height = rng.spread(1.0, 2.0);
        graph.add_child(
            island,
            NodeKind::mesh(
                Geometry::cylinder(radius_top, radius_bottom, platform_height, 6),
                Material::phong(0x0088ff, 0x0044aa, 0.5, 0.9).flat(),
            ),
            "platform",
        );

        let structures = rng.count(3, 5);
        for _ in 0..structures {
            let height = rng.spread(2.0, 6.0);
            let width = rng.spread(0.5, 1.5);
            let angle = rng.angle();
            let reach = rng.unit() * (radius_top - width);
            let yaw = rng.angle();

            let structure = graph.add_child(
                island,
                NodeKind::mesh(
                    Geometry::cuboid(width, height, width),
                    Material::phong(0x00aaff, 0x0066cc, 0.5, 0.8),
                ),
                "structure",
            );
            graph.place(
                structure,
                Transform::at(polar(angle, reach, platform_height / 2.0 + height / 2.0))
                    .with_rotation(Vec3::new(0.0, yaw, 0.0)),
            );
        }

        island
    }

    /// Sagging tube between two island centres
    fn bridge(graph: &mut SceneGraph, world: NodeId, start: Vec3, end: Vec3) -> NodeId {
        let mid = (start + end) * 0.5 - Vec3::Y * BEAM_SAG;
        let points = QuadraticBezier::new(start, mid, end).points(BEAM_SAMPLES);
        graph.add_child(
            world,
            NodeKind::mesh(Geometry::tube(points, 20, 0.2, 8), Material::basic(0x00ffff, 0.6)),
            "bridge",
        )
    }

    fn central_structure(graph: &mut SceneGraph, rng: &mut SceneRng, islands: &[Vec3]) -> NodeId {
        let central = graph.add_group("central structure");

        let base = Geometry::cylinder(10.0, 15.0, 5.0, 6);
        let tower = Geometry::cylinder(2.0, 5.0, 20.0, 6);
        let tower_y = base.height() / 2.0 + tower.height() / 2.0;
        let core_y = tower_y + 5.0;

        graph.add_child(
            central,
            NodeKind::mesh(base, Material::phong(0x0066cc, 0x003366, 0.5, 0.9)),
            "base",
        );
        let tower = graph.add_child(
            central,
            NodeKind::mesh(tower, Material::phong(0x00aaff, 0x0066cc, 0.7, 0.9)),
            "tower",
        );
        graph.set_position(tower, Vec3::Y * tower_y);

        let core = graph.add_child(
            central,
            NodeKind::mesh(Geometry::sphere(3.0, 32, 32), Material::glowing(0x00ffff, 1.0, 0.9)),
            "core",
        );
        graph.set_position(core, Vec3::Y * core_y);

        for i in 0..RING_COUNT {
            let ring = graph.add_child(
                central,
                NodeKind::mesh(
                    Geometry::torus(5.0 + i as f32 * 2.0, 0.2, 16, 50),
                    Material::basic(0x00ffff, 0.7 - i as f32 * 0.15),
                ),
                "core ring",
            );
            graph.place(
                ring,
                Transform::at(Vec3::Y * core_y).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            );

            let axis = Vec3::new(rng.unit() * 0.2, 1.0, rng.unit() * 0.2).normalize();
            let speed = 0.01 - i as f32 * 0.002;
            graph.animate(ring, Motion::Spin { rate: axis * speed });
        }

        let origin = Vec3::Y * core_y;
        for &island in islands {
            segment(graph, central, origin, island, Material::line(0x00ffff, 0.5), "energy beam");
        }

        graph.animate(central, Motion::spin_y(0.001));
        central
    }
}

impl SceneBuilder for DigitalWorld {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let world = graph.add_group("digital world");

        graph.add_child(
            world,
            NodeKind::mesh(
                Geometry::sphere(100.0, 64, 64),
                Material::shell_program(ShaderProgram::HexShell).without_depth_write(),
            ),
            "hex shell",
        );

        let mut positions: Vec<Vec3> = Vec::with_capacity(ISLAND_COUNT);
        for i in 0..ISLAND_COUNT {
            let island = Self::island(graph, rng, i);
            graph.attach(world, island);

            let distance = rng.spread(30.0, 40.0);
            let height = rng.spread(-20.0, 40.0);
            let position = polar(slot_angle(i, ISLAND_COUNT), distance, height);
            let yaw = rng.angle();
            graph.place(island, Transform::at(position).with_rotation(Vec3::new(0.0, yaw, 0.0)));

            let speed = rng.spread(0.2, 0.3);
            let amplitude = rng.spread(1.0, 2.0);
            let spin = 0.001 * rng.sign();
            graph.animate(island, Motion::spin_y(spin));
            graph.animate(
                island,
                Motion::Hover {
                    origin: position,
                    speed,
                    amplitude,
                    phase: 0.0,
                },
            );

            if let Some(&previous) = positions.last() {
                Self::bridge(graph, world, previous, position);
            }
            positions.push(position);
        }

        let central = Self::central_structure(graph, rng, &positions);
        graph.attach(world, central);

        log_built(self.name(), graph, before);
        world
    }

    fn name(&self) -> &str {
        "digital world"
    }
}
