use std::fmt::Write as _;

use anyhow::{anyhow, bail, Result};
use mdminecraft_core::{Block, BlockStateTable, BlockStates};
use mdminecraft_net::{NetworkBuffer, Particle, ProtocolRegistries};
use serde::Serialize;
use tracing::debug;

use crate::config::{OutputFormat, ProtocolConfig};

/// Payload bytes of one particle, as printed by `encode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedParticle {
    pub id: i32,
    pub name: String,
    pub hex: String,
}

/// Block states the demo commands can resolve.
pub fn demo_block_states() -> BlockStateTable {
    [Block::air(), Block::stone()].into_iter().collect()
}

pub fn render_components(
    registries: &ProtocolRegistries,
    config: &ProtocolConfig,
) -> Result<String> {
    let rows = registries.component_rows();
    if config.output == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut out = String::new();
    for row in rows {
        if config.show_channels {
            writeln!(
                out,
                "{:>3} {:<40} network={:<5} tag={}",
                row.id, row.name, row.network, row.tag
            )?;
        } else {
            writeln!(out, "{:>3} {}", row.id, row.name)?;
        }
    }
    Ok(out)
}

pub fn render_particles(
    registries: &ProtocolRegistries,
    config: &ProtocolConfig,
) -> Result<String> {
    let rows = registries.particle_rows();
    if config.output == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut out = String::new();
    for row in rows {
        writeln!(out, "{:>3} {:<40} {}", row.id, row.name, row.kind)?;
    }
    Ok(out)
}

/// Encode the prototype of `name`, with block particles pointed at the
/// configured sample state, and check the bytes decode back to it.
pub fn encode_particle(
    registries: &ProtocolRegistries,
    config: &ProtocolConfig,
    name: &str,
) -> Result<EncodedParticle> {
    let prototype = registries
        .particles()
        .by_name(name)
        .ok_or_else(|| anyhow!("unknown particle {name}"))?;
    let states = demo_block_states();
    let sample = states
        .from_state_id(config.sample_block_state)
        .ok_or_else(|| anyhow!("unknown sample block state {}", config.sample_block_state))?;

    let particle = match prototype {
        Particle::Block(p) => Particle::Block(p.with_block(sample)),
        Particle::BlockMarker(p) => Particle::BlockMarker(p.with_block(sample)),
        Particle::DustPillar(p) => Particle::DustPillar(p.with_block(sample)),
        Particle::FallingDust(p) => Particle::FallingDust(p.with_block(sample)),
        other => other.clone(),
    };

    let mut buf = NetworkBuffer::new();
    particle.write_data(&mut buf)?;
    let hex = to_hex(buf.as_slice());
    let decoded = prototype.read_data(&mut buf, &states)?;
    if decoded != particle || !buf.is_empty() {
        bail!("{name} did not survive a round trip");
    }
    debug!(name = %particle.key(), id = particle.id(), bytes = hex.len() / 2, "particle encoded");

    Ok(EncodedParticle {
        id: particle.id(),
        name: particle.key().to_string(),
        hex,
    })
}

pub fn render_encoded(encoded: &EncodedParticle, config: &ProtocolConfig) -> Result<String> {
    if config.output == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(encoded)?);
    }
    let hex = if encoded.hex.is_empty() {
        "(no payload)"
    } else {
        encoded.hex.as_str()
    };
    Ok(format!("{:>3} {} {}\n", encoded.id, encoded.name, hex))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}
