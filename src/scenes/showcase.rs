use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::ValueEnum;
use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use super::ambient::{DataStream, EnergyWaves, FloatingHolograms, HolographicGrid};
use super::constellation::Constellation;
use super::digital_world::DigitalWorld;
use super::floating::FloatingElements;
use super::network_background::NetworkBackground;
use super::network_core::NetworkCore;
use super::particles::{GlowingParticles, ParticleField};
use super::shells::{AuroraBackdrop, Shell};
use super::skills::SkillElements;
use crate::math::SceneRng;
use crate::scene::SceneGraph;
use crate::traits::SceneBuilder;

/// One complete decorative scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Showcase {
    /// Dense cyberpunk environment with bloom and color grading
    #[default]
    Holodeck,
    /// Pastel node arcs on a light background
    Constellation,
    /// Animated noise backdrop only
    Aurora,
}

impl fmt::Display for Showcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Holodeck => "holodeck",
            Self::Constellation => "constellation",
            Self::Aurora => "aurora",
        };
        f.write_str(name)
    }
}

impl FromStr for Showcase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match <Self as ValueEnum>::from_str(s.trim(), true) {
            Ok(showcase) => Ok(showcase),
            Err(_) => bail!("unknown showcase '{}' (expected holodeck, constellation or aurora)", s),
        }
    }
}

/// Light rig used to shade lit materials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Position of the directional light; it shines toward the origin
    pub direction: Vec3,
}

impl Lighting {
    pub const NONE: Self = Self {
        ambient: 1.0,
        directional: 0.0,
        direction: Vec3::Y,
    };
}

impl Showcase {
    /// Builders in insertion order
    pub fn builders(self) -> Vec<Box<dyn SceneBuilder>> {
        match self {
            Self::Holodeck => vec![
                Box::new(DigitalWorld),
                Box::new(Shell::GRADIENT),
                Box::new(NetworkCore),
                Box::new(FloatingElements),
                Box::new(ParticleField),
                Box::new(HolographicGrid),
                Box::new(EnergyWaves),
                Box::new(FloatingHolograms),
                Box::new(DataStream),
                Box::new(SkillElements),
                Box::new(NetworkBackground),
                Box::new(Shell::GRID),
                Box::new(GlowingParticles),
            ],
            Self::Constellation => vec![Box::new(Constellation)],
            Self::Aurora => vec![Box::new(AuroraBackdrop)],
        }
    }

    pub fn lighting(self) -> Lighting {
        match self {
            Self::Holodeck => Lighting {
                ambient: 0.5,
                directional: 1.0,
                direction: Vec3::new(10.0, 10.0, 10.0),
            },
            Self::Constellation | Self::Aurora => Lighting::NONE,
        }
    }

    /// Run every builder into a fresh graph
    pub fn build(self, rng: &mut SceneRng) -> SceneGraph {
        let mut graph = SceneGraph::new();
        for builder in self.builders() {
            builder.build(&mut graph, rng);
        }

        let stats = graph.stats();
        info!(
            "{} built with seed {}: {} nodes ({} meshes, {} lines, {} particles), {} animated, {} shader-driven",
            self,
            rng.seed(),
            stats.nodes,
            stats.meshes,
            stats.lines,
            stats.particles,
            stats.animated,
            stats.shader_nodes
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Holodeck".parse::<Showcase>().unwrap(), Showcase::Holodeck);
        assert_eq!(" aurora ".parse::<Showcase>().unwrap(), Showcase::Aurora);
        assert!("matrix".parse::<Showcase>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for showcase in [Showcase::Holodeck, Showcase::Constellation, Showcase::Aurora] {
            assert_eq!(showcase.to_string().parse::<Showcase>().unwrap(), showcase);
        }
    }

    #[test]
    fn holodeck_runs_thirteen_builders() {
        assert_eq!(Showcase::Holodeck.builders().len(), 13);
        assert_eq!(Showcase::Aurora.builders().len(), 1);
    }
}
