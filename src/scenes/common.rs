use glam::Vec3;
use log::debug;

use crate::math::SceneRng;
use crate::scene::{Material, NodeId, NodeKind, SceneGraph};

/// Point on a horizontal circle
pub fn polar(angle: f32, radius: f32, y: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Angle of slot `i` out of `count` evenly spaced around a circle
pub fn slot_angle(i: usize, count: usize) -> f32 {
    i as f32 / count as f32 * std::f32::consts::TAU
}

/// Per-axis tumble rate in `[-max, max)`
pub fn tumble_rate(rng: &mut SceneRng, max: f32) -> Vec3 {
    rng.centered_vec3(max * 2.0)
}

/// Straight two-point line under `parent`
pub fn segment(graph: &mut SceneGraph, parent: NodeId, from: Vec3, to: Vec3, material: Material, name: &str) -> NodeId {
    graph.add_child(parent, NodeKind::line(vec![from, to], material), name)
}

pub fn log_built(name: &str, graph: &SceneGraph, nodes_before: usize) {
    debug!("{}: built {} nodes", name, graph.len() - nodes_before);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_lies_on_circle() {
        let p = polar(1.3, 25.0, -4.0);
        assert!((Vec3::new(p.x, 0.0, p.z).length() - 25.0).abs() < 1e-4);
        assert_eq!(p.y, -4.0);
    }

    #[test]
    fn slots_wrap_the_circle() {
        assert_eq!(slot_angle(0, 8), 0.0);
        assert!((slot_angle(4, 8) - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn tumble_rate_bounds() {
        let mut rng = SceneRng::seeded(3);
        for _ in 0..100 {
            let r = tumble_rate(&mut rng, 0.01);
            assert!(r.abs().max_element() <= 0.01);
        }
    }
}
