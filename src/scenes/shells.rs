use super::common::log_built;
use crate::math::SceneRng;
use crate::scene::{Geometry, Material, NodeId, NodeKind, SceneGraph};
use crate::traits::SceneBuilder;
use crate::uniforms::ShaderProgram;

/// Inward-facing sphere painted by a shell program
pub struct Shell {
    pub radius: f32,
    pub program: ShaderProgram,
}

impl Shell {
    /// Blue to purple gradient at radius 50
    pub const GRADIENT: Self = Self {
        radius: 50.0,
        program: ShaderProgram::GradientShell,
    };

    /// Grid-lined sphere at radius 80
    pub const GRID: Self = Self {
        radius: 80.0,
        program: ShaderProgram::GridShell,
    };
}

impl SceneBuilder for Shell {
    fn build(&self, graph: &mut SceneGraph, _rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let id = graph.add(
            NodeKind::mesh(
                Geometry::sphere(self.radius, 64, 64),
                Material::shell_program(self.program),
            ),
            self.program.label(),
        );
        log_built(self.name(), graph, before);
        id
    }

    fn name(&self) -> &str {
        self.program.label()
    }
}

/// Full-screen noise backdrop
pub struct AuroraBackdrop;

impl SceneBuilder for AuroraBackdrop {
    fn build(&self, graph: &mut SceneGraph, _rng: &mut SceneRng) -> NodeId {
        graph.add(
            NodeKind::mesh(
                Geometry::Plane { width: 2.0, height: 2.0 },
                Material::backdrop_program(ShaderProgram::Aurora),
            ),
            "aurora backdrop",
        )
    }

    fn name(&self) -> &str {
        "aurora backdrop"
    }
}
