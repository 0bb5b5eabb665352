use std::sync::Arc;

use glam::Vec3;

use super::graph::NodeId;
use crate::math::{CubicBezier, Path};

/// Animation descriptor attached to a node at build time
///
/// Rates marked "per frame" are increments applied once per driver step;
/// everything else is evaluated against elapsed seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// `rotation += rate` per frame
    Spin { rate: Vec3 },
    /// Absolute vertical bob around a rest position
    Hover {
        origin: Vec3,
        speed: f32,
        amplitude: f32,
        phase: f32,
    },
    /// `position.y += sin(t * speed + phase) * step` per frame
    Drift { speed: f32, phase: f32, step: f32 },
    /// Uniform scale `1 + sin(t * frequency + phase) * depth`
    Breathe { frequency: f32, phase: f32, depth: f32 },
    /// Constant-speed travel along a curve, wrapping back to the start
    Ride {
        path: Arc<Path<CubicBezier>>,
        progress: f32,
        speed: f32,
    },
    /// Line endpoints follow two sibling nodes
    Tether { from: NodeId, to: NodeId },
    /// Opacity pulse `base * (0.7 + sin(t * speed + phase) * 0.3)`
    Flicker { base: f32, speed: f32, phase: f32 },
}

impl Motion {
    pub fn spin_y(rate: f32) -> Self {
        Self::Spin {
            rate: Vec3::new(0.0, rate, 0.0),
        }
    }

    pub fn spin_z(rate: f32) -> Self {
        Self::Spin {
            rate: Vec3::new(0.0, 0.0, rate),
        }
    }

    /// Tethers run after every transform motion of the frame
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Tether { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tethers_are_deferred() {
        assert!(Motion::Tether { from: NodeId(0), to: NodeId(1) }.is_deferred());
        assert!(!Motion::spin_y(0.001).is_deferred());
        assert!(!Motion::Flicker { base: 0.5, speed: 1.5, phase: 0.0 }.is_deferred());
    }
}
