mod ambient;
mod common;
mod constellation;
mod digital_world;
mod floating;
mod network_background;
mod network_core;
mod particles;
mod shells;
mod showcase;
mod skills;

pub use ambient::{DataStream, EnergyWaves, FloatingHolograms, HolographicGrid};
pub use constellation::{Constellation, Section, SECTIONS};
pub use digital_world::DigitalWorld;
pub use floating::FloatingElements;
pub use network_background::{link_opacity, NetworkBackground};
pub use network_core::NetworkCore;
pub use particles::{DataFlowParticles, GlowingParticles, ParticleField};
pub use shells::{AuroraBackdrop, Shell};
pub use showcase::{Lighting, Showcase};
pub use skills::SkillElements;

/// Fixed counts the builders produce, shared with tests and benches
pub mod counts {
    pub use super::ambient::{HOLOGRAM_COUNT, PACKETS_PER_STREAM, STREAM_COUNT, WAVE_COUNT};
    pub use super::constellation::MAX_LINK_DISTANCE as CONSTELLATION_LINK_DISTANCE;
    pub use super::digital_world::{ISLAND_COUNT, RING_COUNT as CORE_RING_COUNT};
    pub use super::floating::{NODE_COUNT as FLOATING_NODE_COUNT, SHAPE_COUNT};
    pub use super::network_background::{MAX_LINK_DISTANCE as BACKGROUND_LINK_DISTANCE, NODE_COUNT as BACKGROUND_NODE_COUNT};
    pub use super::network_core::{BEAM_COUNT, RING_COUNT as NETWORK_RING_COUNT, SATELLITE_COUNT};
    pub use super::particles::{DATA_FLOW_COUNT, FIELD_COUNT, GLOW_COUNT};
    pub use super::skills::{BAR_COUNT, RACK_COUNT, SCATTER_COUNT, SPOKE_COUNT, SYMBOL_COUNT};
}
