use glam::Vec3;
use log::trace;

use crate::scene::{Motion, Node, NodeId, NodeKind, SceneGraph};

/// Timing handed to the driver each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop started
    pub elapsed: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// Virtual time of frame `index` at a fixed rate
    pub fn fixed(index: u64, hz: f32) -> Self {
        let delta = 1.0 / hz;
        Self {
            elapsed: index as f32 * delta,
            delta,
        }
    }
}

/// Advances every animated entity once per frame
///
/// Transform motions run first for all entities so that tethered lines
/// read positions from the same frame.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    frames: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns the number of motion descriptors applied
    pub fn step(&mut self, graph: &mut SceneGraph, time: FrameTime) -> usize {
        let t = time.elapsed;
        let mut applied = 0;
        let mut tethers: Vec<(NodeId, NodeId, NodeId)> = Vec::new();

        for i in 0..graph.animated().len() {
            let id = graph.animated()[i];
            let Some(node) = graph.node_mut(id) else {
                continue;
            };
            let Node {
                transform,
                motions,
                kind,
                ..
            } = node;

            for motion in motions.iter_mut() {
                match motion {
                    Motion::Spin { rate } => transform.rotation += *rate,
                    Motion::Hover {
                        origin,
                        speed,
                        amplitude,
                        phase,
                    } => {
                        transform.position = *origin + Vec3::Y * ((t * *speed + *phase).sin() * *amplitude);
                    }
                    Motion::Drift { speed, phase, step } => {
                        transform.position.y += (t * *speed + *phase).sin() * *step;
                    }
                    Motion::Breathe {
                        frequency,
                        phase,
                        depth,
                    } => {
                        transform.scale = Vec3::splat(1.0 + (t * *frequency + *phase).sin() * *depth);
                    }
                    Motion::Ride { path, progress, speed } => {
                        *progress += *speed;
                        if *progress > 1.0 {
                            *progress = 0.0;
                        }
                        transform.position = path.point_at(*progress);
                    }
                    Motion::Flicker { base, speed, phase } => {
                        if let Some(material) = kind.material_mut() {
                            material.set_opacity(*base * (0.7 + (t * *speed + *phase).sin() * 0.3));
                        }
                    }
                    Motion::Tether { from, to } => {
                        tethers.push((id, *from, *to));
                        continue;
                    }
                }
                applied += 1;
            }
        }

        for (line, from, to) in tethers {
            let (Some(a), Some(b)) = (graph.transform(from), graph.transform(to)) else {
                continue;
            };
            let (a, b) = (a.position, b.position);
            if let Some(NodeKind::Line { points, .. }) = graph.node_mut(line).map(|n| &mut n.kind) {
                points.clear();
                points.extend([a, b]);
                applied += 1;
            }
        }

        self.frames += 1;
        trace!("frame {} applied {} motions", self.frames, applied);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material, Transform};
    use std::f32::consts::FRAC_PI_2;

    fn sphere() -> NodeKind {
        NodeKind::mesh(Geometry::sphere(1.0, 8, 8), Material::basic(0xffffff, 1.0))
    }

    #[test]
    fn spin_accumulates_per_frame() {
        let mut graph = SceneGraph::new();
        let id = graph.add(sphere(), "s");
        graph.animate(id, Motion::spin_y(0.01));

        let mut driver = AnimationDriver::new();
        for frame in 0..10 {
            driver.step(&mut graph, FrameTime::fixed(frame, 60.0));
        }
        assert!((graph.transform(id).unwrap().rotation.y - 0.1).abs() < 1e-5);
        assert_eq!(driver.frames(), 10);
    }

    #[test]
    fn hover_is_absolute() {
        let mut graph = SceneGraph::new();
        let id = graph.add(sphere(), "s");
        let origin = Vec3::new(1.0, 2.0, 3.0);
        graph.animate(
            id,
            Motion::Hover {
                origin,
                speed: 1.0,
                amplitude: 2.0,
                phase: 0.0,
            },
        );

        let mut driver = AnimationDriver::new();
        driver.step(&mut graph, FrameTime::new(FRAC_PI_2, 0.016));
        driver.step(&mut graph, FrameTime::new(FRAC_PI_2, 0.016));
        let p = graph.transform(id).unwrap().position;
        assert!(p.distance(Vec3::new(1.0, 4.0, 3.0)) < 1e-5);
    }

    #[test]
    fn breathe_sets_uniform_scale() {
        let mut graph = SceneGraph::new();
        let id = graph.add(sphere(), "s");
        graph.animate(
            id,
            Motion::Breathe {
                frequency: 1.0,
                phase: 0.0,
                depth: 0.1,
            },
        );
        AnimationDriver::new().step(&mut graph, FrameTime::new(FRAC_PI_2, 0.0));
        assert!((graph.transform(id).unwrap().scale - Vec3::splat(1.1)).length() < 1e-5);
    }

    #[test]
    fn flicker_scales_base_opacity() {
        let mut graph = SceneGraph::new();
        let id = graph.add(NodeKind::line(vec![Vec3::ZERO, Vec3::X], Material::line(0xffffff, 0.4)), "l");
        graph.animate(
            id,
            Motion::Flicker {
                base: 0.4,
                speed: 1.5,
                phase: 0.0,
            },
        );
        AnimationDriver::new().step(&mut graph, FrameTime::new(0.0, 0.0));
        let opacity = graph.node(id).unwrap().kind.material().unwrap().opacity();
        assert!((opacity - 0.28).abs() < 1e-6);
    }

    #[test]
    fn ride_wraps_to_curve_start_past_the_end() {
        use crate::math::{CubicBezier, Path};
        use std::sync::Arc;

        let start = Vec3::new(-30.0, 0.0, 2.0);
        let path = Arc::new(Path::new(CubicBezier::new(
            start,
            Vec3::new(-10.0, 10.0, 0.0),
            Vec3::new(10.0, -10.0, 0.0),
            Vec3::new(30.0, 0.0, -2.0),
        )));
        let mut graph = SceneGraph::new();
        let id = graph.add(sphere(), "packet");
        graph.animate(
            id,
            Motion::Ride {
                path: Arc::clone(&path),
                progress: 0.99,
                speed: 0.02,
            },
        );

        AnimationDriver::new().step(&mut graph, FrameTime::fixed(1, 60.0));
        let node = graph.node(id).unwrap();
        match &node.motions[0] {
            Motion::Ride { progress, .. } => assert_eq!(*progress, 0.0),
            other => panic!("unexpected {:?}", other),
        }
        assert!(node.transform.position.distance(start) < 1e-4);
    }

    #[test]
    fn tethers_see_positions_from_the_same_frame() {
        let mut graph = SceneGraph::new();
        let line = graph.add(NodeKind::line(vec![Vec3::ZERO, Vec3::ZERO], Material::line(0xffffff, 0.3)), "link");
        let a = graph.add(sphere(), "a");
        let b = graph.add(sphere(), "b");
        graph.place(a, Transform::at(Vec3::new(0.0, 0.0, 0.0)));
        graph.place(b, Transform::at(Vec3::new(5.0, 0.0, 0.0)));

        // the line is registered before the nodes it follows
        graph.animate(line, Motion::Tether { from: a, to: b });
        graph.animate(a, Motion::Drift { speed: 0.0, phase: FRAC_PI_2, step: 1.0 });

        AnimationDriver::new().step(&mut graph, FrameTime::new(0.0, 0.0));
        match &graph.node(line).unwrap().kind {
            NodeKind::Line { points, .. } => {
                assert_eq!(points.len(), 2);
                assert!(points[0].distance(Vec3::new(0.0, 1.0, 0.0)) < 1e-5);
                assert_eq!(points[1], Vec3::new(5.0, 0.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
