use super::common::log_built;
use crate::math::{hex_to_rgb, hsl_to_rgb, SceneRng, CYAN, MAGENTA, YELLOW};
use crate::scene::{Material, Motion, NodeId, NodeKind, PointCloud, SceneGraph};
use crate::traits::SceneBuilder;
use crate::uniforms::ShaderProgram;

pub const FIELD_COUNT: usize = 5000;
pub const GLOW_COUNT: usize = 1000;
pub const DATA_FLOW_COUNT: usize = 200;

const NEON_GREEN: u32 = 0x00ff88;
const ORANGE: u32 = 0xffaa00;

/// Drifting sparks filling a 100-unit cube
pub struct ParticleField;

impl SceneBuilder for ParticleField {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let palette = [CYAN, MAGENTA, YELLOW, NEON_GREEN].map(hex_to_rgb);

        let mut cloud = PointCloud::with_capacity(FIELD_COUNT);
        for _ in 0..FIELD_COUNT {
            let position = rng.centered_vec3(100.0);
            let color = *rng.pick(&palette);
            let size = rng.spread(0.1, 0.5);
            cloud.push(position, color, size);
        }

        let before = graph.len();
        let id = graph.add(
            NodeKind::points(cloud, Material::sprite_program(ShaderProgram::Sparks)),
            "particle field",
        );
        log_built(self.name(), graph, before);
        id
    }

    fn name(&self) -> &str {
        "particle field"
    }
}

/// Cyan, magenta and orange glow dots in a thick spherical shell
pub struct GlowingParticles;

impl SceneBuilder for GlowingParticles {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let (cyan, magenta, orange) = (hex_to_rgb(CYAN), hex_to_rgb(MAGENTA), hex_to_rgb(ORANGE));

        let mut cloud = PointCloud::with_capacity(GLOW_COUNT);
        for _ in 0..GLOW_COUNT {
            let position = rng.in_shell(5.0, 60.0);
            let choice = rng.unit();
            let color = if choice < 0.33 {
                cyan
            } else if choice < 0.66 {
                magenta
            } else {
                orange
            };
            let size = rng.spread(0.5, 1.5);
            cloud.push(position, color, size);
        }

        let before = graph.len();
        let id = graph.add(
            NodeKind::points(cloud, Material::sprite_program(ShaderProgram::Glow)),
            "glowing particles",
        );
        log_built(self.name(), graph, before);
        id
    }

    fn name(&self) -> &str {
        "glowing particles"
    }
}

/// Slowly turning blue-violet dust
pub struct DataFlowParticles;

impl SceneBuilder for DataFlowParticles {
    fn build(&self, graph: &mut SceneGraph, rng: &mut SceneRng) -> NodeId {
        let before = graph.len();
        let group = graph.add_group("data flow");

        let mut cloud = PointCloud::with_capacity(DATA_FLOW_COUNT);
        for _ in 0..DATA_FLOW_COUNT {
            let position = rng.in_shell(15.0, 25.0);
            let color = hsl_to_rgb(rng.spread(0.6, 0.1), 0.8, 0.6);
            cloud.push(position, color, 0.5);
        }

        let points = graph.add_child(group, NodeKind::points(cloud, Material::points(0.5, 0.8)), "data flow particles");
        graph.animate(points, Motion::spin_y(0.0005));

        log_built(self.name(), graph, before);
        group
    }

    fn name(&self) -> &str {
        "data flow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud_of(graph: &SceneGraph, id: NodeId) -> &PointCloud {
        match &graph.node(id).unwrap().kind {
            NodeKind::Points { cloud, .. } => cloud,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn field_stays_inside_cube() {
        let mut graph = SceneGraph::new();
        let id = ParticleField.build(&mut graph, &mut SceneRng::seeded(5));
        let cloud = cloud_of(&graph, id);
        assert_eq!(cloud.len(), FIELD_COUNT);
        assert_eq!(cloud.colors.len(), FIELD_COUNT);
        assert!(cloud.positions.iter().all(|p| p.abs().max_element() <= 50.0));
        assert!(cloud.sizes.iter().all(|s| (0.1..0.6).contains(s)));
    }

    #[test]
    fn glow_shell_radius() {
        let mut graph = SceneGraph::new();
        let id = GlowingParticles.build(&mut graph, &mut SceneRng::seeded(5));
        let cloud = cloud_of(&graph, id);
        assert_eq!(cloud.len(), GLOW_COUNT);
        for p in &cloud.positions {
            let r = p.length();
            assert!(r >= 5.0 - 1e-3 && r < 65.0 + 1e-3);
        }
    }

    #[test]
    fn data_flow_spins() {
        let mut graph = SceneGraph::new();
        let group = DataFlowParticles.build(&mut graph, &mut SceneRng::seeded(5));
        let points = graph.children(group)[0];
        assert_eq!(cloud_of(&graph, points).len(), DATA_FLOW_COUNT);
        assert_eq!(graph.animated(), &[points]);
    }
}
