use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::Vec3;

use super::common::{log_built, tumble_rate};
use crate::math::{CubicBezier, Curve, Path, SceneRng, CYAN, YELLOW};
use crate::scene::{Geometry, Material, Motion, NodeId, NodeKind, SceneGraph, Transform};
use crate::traits::SceneBuilder;

pub const WAVE_COUNT: usize = 3;
pub const HOLOGRAM_COUNT: usize = 5;
pub const STREAM_COUNT: usize = 10;
pub const PACKETS_PER_STREAM: usize = 5;
const STREAM_SEGMENTS: usize = 20;

/// Cyan floor grid below the scene
pub struct HolographicGrid;

impl SceneBuilder for HolographicGrid {
    fn build(&self, graph: &mut SceneGraph, _rng: &mut SceneRng) -> NodeId {
        let grid = graph.add(
            NodeKind::Grid {
                size: 100.0,
                divisions: 50,
                material: Material::line(CYAN, 0.3),
            },
            "holographic grid",
        );
        graph.set_position(grid, Vec3::Y * -20.0);
        graph.animate(grid, Motion::spin_y(0.001));
        grid
    }

    fn name(&self) -> &str {
        "holographic grid"
    }
}

/// Concentric flat rings that breathe in and out
pub struct EnergyWaves;

impl SceneBuilder for EnergyWaves {
    fn build(&self, graph: &mut SceneGraph, _rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("energy waves");

        for i in 0..WAVE_COUNT {
            let wave = graph.add_child(
                group,
                NodeKind::mesh(
                    Geometry::torus(10.0 + i as f32 * 5.0, 0.2, 16, 100),
                    Material::basic(CYAN, 0.5 - i as f32 * 0.1),
                ),
                "wave",
            );
            graph.place(wave, Transform::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)));

            let speed = 0.01 - i as f32 * 0.002;
            graph.animate(
                wave,
                Motion::Breathe {
                    frequency: speed * 5.0,
                    phase: 0.0,
                    depth: 0.1,
                },
            );
        }

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "energy waves"
    }
}

/// Tumbling, stretched wireframe polyhedra
pub struct FloatingHolograms;

impl SceneBuilder for FloatingHolograms {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("holograms");
        let shapes = [
            Geometry::icosahedron(1.0, 0),
            Geometry::tetrahedron(1.0, 0),
            Geometry::octahedron(1.0, 0),
        ];

        for _ in 0..HOLOGRAM_COUNT {
            let geometry = rng.pick(&shapes).clone();
            let position = Vec3::new(rng.centered(40.0), rng.centered(20.0) + 10.0, rng.centered(40.0));
            let scale = Vec3::new(rng.spread(1.0, 2.0), rng.spread(1.0, 2.0), rng.spread(1.0, 2.0));
            let rate = tumble_rate(rng, 0.01);
            let float_speed = rng.spread(0.005, 0.01);

            let hologram = graph.add_child(
                group,
                NodeKind::mesh(geometry, Material::glowing(CYAN, 0.5, 0.7).wireframe()),
                "hologram",
            );
            graph.place(hologram, Transform::at(position).with_scale(scale));
            graph.animate(hologram, Motion::Spin { rate });
            graph.animate(
                hologram,
                Motion::Drift {
                    speed: float_speed,
                    phase: 0.0,
                    step: 0.05,
                },
            );
        }

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "holograms"
    }
}

/// Bezier data lines with packets riding along them
pub struct DataStream;

impl SceneBuilder for DataStream {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("data stream");

        for _ in 0..STREAM_COUNT {
            let curve = CubicBezier::new(
                Vec3::new(-30.0, 0.0, rng.centered(30.0)),
                Vec3::new(-10.0, 10.0, rng.centered(20.0)),
                Vec3::new(10.0, -10.0, rng.centered(20.0)),
                Vec3::new(30.0, 0.0, rng.centered(30.0)),
            );
            let points = curve.points(STREAM_SEGMENTS);
            let path = Arc::new(Path::new(curve));

            for _ in 0..PACKETS_PER_STREAM {
                let progress = rng.unit();
                let speed = rng.spread(0.005, 0.01);
                let packet = graph.add_child(
                    group,
                    NodeKind::mesh(Geometry::sphere(0.2, 8, 8), Material::basic(YELLOW, 0.8)),
                    "packet",
                );
                graph.set_position(packet, path.point_at(progress));
                graph.animate(
                    packet,
                    Motion::Ride {
                        path: Arc::clone(&path),
                        progress,
                        speed,
                    },
                );
            }

            graph.add_child(group, NodeKind::line(points, Material::line(CYAN, 0.6)), "stream");
        }

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "data stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_packet_rides() {
        let mut graph = SceneGraph::new();
        DataStream.build(&mut graph, &mut SceneRng::seeded(2));
        assert_eq!(graph.find_all("stream").count(), STREAM_COUNT);
        assert_eq!(graph.find_all("packet").count(), STREAM_COUNT * PACKETS_PER_STREAM);
        assert_eq!(graph.animated().len(), STREAM_COUNT * PACKETS_PER_STREAM);
    }

    #[test]
    fn stream_lines_have_endpoints_at_the_edges() {
        let mut graph = SceneGraph::new();
        DataStream.build(&mut graph, &mut SceneRng::seeded(2));
        for id in graph.find_all("stream") {
            let NodeKind::Line { points, .. } = &graph.node(id).unwrap().kind else {
                panic!("stream should be a line");
            };
            assert_eq!(points.len(), STREAM_SEGMENTS + 1);
            assert_eq!(points[0].x, -30.0);
            assert_eq!(points[STREAM_SEGMENTS].x, 30.0);
        }
    }

    #[test]
    fn holograms_tumble_and_drift() {
        let mut graph = SceneGraph::new();
        let group = FloatingHolograms.build(&mut graph, &mut SceneRng::seeded(9));
        for &id in graph.children(group) {
            let node = graph.node(id).unwrap();
            assert_eq!(node.motions.len(), 2);
            assert!(node.kind.material().unwrap().is_wireframe());
            assert!(node.transform.scale.min_element() >= 1.0);
        }
    }

    #[test]
    fn waves_breathe_slower_outward() {
        let mut graph = SceneGraph::new();
        let group = EnergyWaves.build(&mut graph, &mut SceneRng::seeded(0));
        let frequencies: Vec<f32> = graph
            .children(group)
            .iter()
            .map(|&id| match graph.node(id).unwrap().motions[0] {
                Motion::Breathe { frequency, .. } => frequency,
                ref other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(frequencies.len(), WAVE_COUNT);
        assert!(frequencies.windows(2).all(|w| w[0] > w[1]));
    }
}
