use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec3;

use super::common::{log_built, polar, slot_angle};
use crate::math::SceneRng;
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;

pub const RING_COUNT: usize = 5;
pub const BEAM_COUNT: usize = 12;
pub const SATELLITE_COUNT: usize = 8;

/// Wireframe octahedron core with rings, radial beams and satellites
pub struct NetworkCore;

impl SceneBuilder for NetworkCore {
    fn build(&self, graph: &mut SceneGraph, _rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("network core");

        let core = graph.add_child(
            group,
            NodeKind::mesh(Geometry::octahedron(8.0, 3), Material::glowing(0x00ffff, 0.5, 0.7).wireframe()),
            "core",
        );
        graph.place(core, Transform::default().with_rotation(Vec3::new(FRAC_PI_4, FRAC_PI_4, 0.0)));

        for i in 0..RING_COUNT {
            let ring = graph.add_child(
                group,
                NodeKind::mesh(
                    Geometry::torus(12.0 + i as f32 * 3.0, 0.3, 16, 100),
                    Material::basic(0x00ffff, 0.3 - i as f32 * 0.05),
                ),
                "energy ring",
            );
            graph.place(
                ring,
                Transform::at(Vec3::Y * (i as f32 * 2.0 - 4.0)).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            );
        }

        for i in 0..BEAM_COUNT {
            let beam = graph.add_child(
                group,
                NodeKind::mesh(Geometry::cylinder(0.3, 0.3, 40.0, 8), Material::glowing(0x00ffff, 0.3, 0.4)),
                "radial beam",
            );
            graph.place(
                beam,
                Transform::at(Vec3::Y * -10.0).with_rotation(Vec3::new(0.0, 0.0, slot_angle(i, BEAM_COUNT))),
            );
        }

        for i in 0..SATELLITE_COUNT {
            let node = graph.add_child(
                group,
                NodeKind::mesh(Geometry::icosahedron(3.0, 1), Material::glowing(0xff00ff, 0.3, 0.6).wireframe()),
                "satellite",
            );
            graph.set_position(node, polar(slot_angle(i, SATELLITE_COUNT), 25.0, 0.0));
        }

        graph.set_position(group, Vec3::new(0.0, 0.0, -30.0));
        graph.animate(group, Motion::spin_y(0.001));

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "network core"
    }
}
