//! Both catalogs, built once and shared.

use crate::component::ComponentCatalog;
use crate::particle::ParticleCatalog;
use mdminecraft_core::RegistryError;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The component and particle catalogs a connection or world needs.
///
/// Built before any networking starts and handed out behind an [`Arc`];
/// nothing mutates it afterwards, so lookups need no locking.
#[derive(Debug)]
pub struct ProtocolRegistries {
    components: ComponentCatalog,
    particles: ParticleCatalog,
}

impl ProtocolRegistries {
    /// Declare the vanilla components, then the vanilla particles.
    pub fn vanilla() -> Result<Arc<Self>, RegistryError> {
        let components = ComponentCatalog::vanilla()?;
        let particles = ParticleCatalog::vanilla()?;
        info!(
            components = components.len(),
            particles = particles.len(),
            "protocol registries ready"
        );
        Ok(Arc::new(Self::new(components, particles)))
    }

    /// Bundle catalogs built elsewhere.
    pub fn new(components: ComponentCatalog, particles: ParticleCatalog) -> Self {
        Self {
            components,
            particles,
        }
    }

    /// Item components.
    pub fn components(&self) -> &ComponentCatalog {
        &self.components
    }

    /// Particle types.
    pub fn particles(&self) -> &ParticleCatalog {
        &self.particles
    }

    /// One row per component, in id order.
    pub fn component_rows(&self) -> Vec<ComponentRow> {
        self.components
            .iter()
            .map(|component| ComponentRow {
                id: component.id(),
                name: component.key().to_string(),
                network: component.is_networked(),
                tag: component.is_persisted(),
            })
            .collect()
    }

    /// One row per particle type, in id order.
    pub fn particle_rows(&self) -> Vec<ParticleRow> {
        self.particles
            .iter()
            .map(|particle| ParticleRow {
                id: particle.id(),
                name: particle.key().to_string(),
                kind: particle.kind().name(),
            })
            .collect()
    }
}

/// Summary of a component definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRow {
    /// Protocol id.
    pub id: i32,
    /// Namespaced name.
    pub name: String,
    /// Has a binary codec.
    pub network: bool,
    /// Has a tag codec.
    pub tag: bool,
}

/// Summary of a particle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticleRow {
    /// Protocol id.
    pub id: i32,
    /// Namespaced name.
    pub name: String,
    /// Payload shape.
    pub kind: &'static str,
}
