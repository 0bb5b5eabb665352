use glam::{Mat4, Vec2, Vec3};
use log::trace;
use serde::Serialize;

use crate::scene::SceneGraph;

/// Custom GPU programs used by the scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShaderProgram {
    /// Pulsing hexagon lattice on the digital world's outer sphere
    HexShell,
    /// Blue to purple gradient with a rippling sine term
    GradientShell,
    /// Three-level grid over a dark gradient
    GridShell,
    /// Drifting additive sparks (particle field)
    Sparks,
    /// Drifting additive glow dots
    Glow,
    /// Full-screen simplex-noise backdrop
    Aurora,
}

const SHELLS_WGSL: &str = include_str!("shaders/shells.wgsl");
const POINTS_WGSL: &str = include_str!("shaders/points.wgsl");
const AURORA_WGSL: &str = include_str!("shaders/aurora.wgsl");

impl ShaderProgram {
    pub const ALL: [Self; 6] = [
        Self::HexShell,
        Self::GradientShell,
        Self::GridShell,
        Self::Sparks,
        Self::Glow,
        Self::Aurora,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::HexShell => "hex shell",
            Self::GradientShell => "gradient shell",
            Self::GridShell => "grid shell",
            Self::Sparks => "sparks",
            Self::Glow => "glow",
            Self::Aurora => "aurora",
        }
    }

    /// WGSL module containing the program
    pub fn source(self) -> &'static str {
        match self {
            Self::HexShell | Self::GradientShell | Self::GridShell => SHELLS_WGSL,
            Self::Sparks | Self::Glow => POINTS_WGSL,
            Self::Aurora => AURORA_WGSL,
        }
    }

    /// Vertex and fragment entry points inside [`Self::source`]
    pub fn entry_points(self) -> (&'static str, &'static str) {
        match self {
            Self::HexShell => ("vs_shell", "fs_hex"),
            Self::GradientShell => ("vs_shell", "fs_gradient"),
            Self::GridShell => ("vs_shell", "fs_grid"),
            Self::Sparks => ("vs_sparks", "fs_sprite"),
            Self::Glow => ("vs_glow", "fs_sprite"),
            Self::Aurora => ("vs_fullscreen", "fs_aurora"),
        }
    }

    pub fn is_sprite(self) -> bool {
        matches!(self, Self::Sparks | Self::Glow)
    }

    pub fn is_shell(self) -> bool {
        matches!(self, Self::HexShell | Self::GradientShell | Self::GridShell)
    }

    /// CPU mirror of the vertex-stage drift applied by point programs
    ///
    /// `y` is displaced first from the rest `x`, then `x` from the rest `z`,
    /// matching the order the vertex stage uses. Other programs leave
    /// positions alone.
    pub fn drift(self, position: Vec3, time: f32) -> Vec3 {
        let mut p = position;
        match self {
            Self::Sparks => {
                p.y += (time * 0.2 + position.x * 0.05).sin() * 0.5;
                p.x += (time * 0.2 + position.z * 0.05).cos() * 0.5;
            }
            Self::Glow => {
                p.y += (time * 0.5 + position.x).sin() * 0.5;
                p.x += (time * 0.3 + position.z).cos() * 0.5;
            }
            _ => {}
        }
        p
    }
}

/// Uniform block owned by a shader material
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShaderUniforms {
    pub time: f32,
}

/// Pushes elapsed time into every shader-driven material
pub struct UniformFeed;

impl UniformFeed {
    /// Returns how many materials were fed
    pub fn push(graph: &mut SceneGraph, time: f32) -> usize {
        let ids = graph.shader_nodes().to_vec();
        let mut fed = 0;
        for id in ids {
            if let Some(shader) = graph.material_mut(id).and_then(|m| m.shader_mut()) {
                shader.uniforms.time = time;
                fed += 1;
            }
        }
        trace!("fed time {:.3} to {} shader materials", time, fed);
        fed
    }
}

/// Per-frame uniform block shared by every pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

impl FrameUniform {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec2, time: f32) -> Self {
        Self {
            view_proj: (projection * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            viewport: viewport.to_array(),
            time,
            _pad: 0.0,
        }
    }
}

/// Composite pass parameters: bloom then color correction
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniform {
    pub bloom: [f32; 4],
    pub grade: [f32; 4],
    pub texel: [f32; 2],
    pub _pad: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material, NodeKind, PointCloud};

    #[test]
    fn push_feeds_every_shader_material() {
        let mut graph = SceneGraph::new();
        let shell = graph.add(
            NodeKind::mesh(Geometry::sphere(100.0, 64, 64), Material::shell_program(ShaderProgram::HexShell)),
            "shell",
        );
        let sparks = graph.add(
            NodeKind::points(PointCloud::default(), Material::sprite_program(ShaderProgram::Sparks)),
            "sparks",
        );
        graph.add(NodeKind::mesh(Geometry::sphere(1.0, 8, 8), Material::basic(0xffffff, 1.0)), "plain");

        assert_eq!(UniformFeed::push(&mut graph, 2.5), 2);
        for id in [shell, sparks] {
            let time = graph.node(id).unwrap().kind.material().unwrap().shader().unwrap().uniforms.time;
            assert_eq!(time, 2.5);
        }
    }

    #[test]
    fn sparks_drift_uses_rest_position() {
        let p = Vec3::new(10.0, 0.0, 20.0);
        let moved = ShaderProgram::Sparks.drift(p, 0.0);
        assert!((moved.y - (0.5f32).sin() * 0.5).abs() < 1e-6);
        assert!((moved.x - (10.0 + (1.0f32).cos() * 0.5)).abs() < 1e-6);
        assert_eq!(moved.z, 20.0);
    }

    #[test]
    fn shells_do_not_drift() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(ShaderProgram::GridShell.drift(p, 10.0), p);
    }

    #[test]
    fn frame_uniform_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 144);
        assert_eq!(std::mem::size_of::<PostUniform>(), 48);
    }
}
