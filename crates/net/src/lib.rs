#![warn(missing_docs)]
//! Binary protocol codecs and the item component / particle catalogs.
//!
//! Everything here is built once at startup through
//! [`ProtocolRegistries::vanilla`] and read concurrently afterwards.

pub mod buffer;
pub mod component;
pub mod nbt;
pub mod particle;
pub mod registries;
pub mod types;

pub use buffer::{NetworkBuffer, MAX_STRING_LEN};
pub use component::{AnyComponent, ComponentCatalog, ComponentValue, DataComponent};
pub use particle::{Particle, ParticleCatalog, ParticleKind, SourceType, VibrationSource};
pub use registries::{ComponentRow, ParticleRow, ProtocolRegistries};
pub use types::NetworkType;
