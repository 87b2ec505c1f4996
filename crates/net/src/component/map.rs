//! Filled-map and compass components.

use crate::types::{self, NetworkType};
use mdminecraft_core::tag::{CompoundBuilder, TagSerializer};
use mdminecraft_core::{protocol_enum, BlockPosition, CodecError, Tag};
use std::collections::BTreeMap;

/// A marker drawn on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDecoration {
    /// Decoration type key.
    pub kind: String,
    /// World X.
    pub x: f64,
    /// World Z.
    pub z: f64,
    /// Rotation in degrees.
    pub rotation: f32,
}

/// Decorations keyed by their unique id. Only stored, never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapDecorations(pub BTreeMap<String, MapDecoration>);

impl MapDecorations {
    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                tag.as_compound()?
                    .iter()
                    .map(|(id, entry)| -> Result<(String, MapDecoration), CodecError> {
                        let fields = entry.reader()?;
                        let decoration = MapDecoration {
                            kind: fields.string("type")?,
                            x: fields.double("x")?,
                            z: fields.double("z")?,
                            rotation: fields.float_or("rotation", 0.0)?,
                        };
                        Ok((id.clone(), decoration))
                    })
                    .collect::<Result<_, _>>()
                    .map(MapDecorations)
            },
            |decorations: &MapDecorations| {
                Tag::Compound(
                    decorations
                        .0
                        .iter()
                        .map(|(id, decoration)| {
                            let entry = CompoundBuilder::new()
                                .put("type", decoration.kind.as_str())
                                .put("x", decoration.x)
                                .put("z", decoration.z)
                                .put("rotation", decoration.rotation)
                                .build();
                            (id.clone(), entry)
                        })
                        .collect(),
                )
            },
        )
    }
}

protocol_enum! {
    /// Pending cartography-table operation. Only sent, never stored.
    pub enum MapPostProcessing("map post processing") {
        /// Lock the map.
        Lock => "lock",
        /// Zoom out one level.
        Scale => "scale",
    }
}

impl MapPostProcessing {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        types::ordinal()
    }
}

/// A block position in a named dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalPosition {
    /// Dimension key.
    pub dimension: String,
    /// Position within the dimension.
    pub position: BlockPosition,
}

impl GlobalPosition {
    fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(GlobalPosition {
                    dimension: buf.read_string()?,
                    position: buf.read_block_position()?,
                })
            },
            |buf, target: &GlobalPosition| {
                buf.write_string(&target.dimension)?;
                buf.write_block_position(target.position);
                Ok(())
            },
        )
    }

    fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                let position = match fields.required("pos")?.as_int_array()? {
                    [x, y, z] => BlockPosition::new(*x, *y, *z),
                    other => {
                        return Err(CodecError::ListTooLong {
                            len: other.len(),
                            max: 3,
                        })
                    }
                };
                Ok(GlobalPosition {
                    dimension: fields.string("dimension")?,
                    position,
                })
            },
            |target: &GlobalPosition| {
                CompoundBuilder::new()
                    .put("dimension", target.dimension.as_str())
                    .put("pos", Tag::IntArray(target.position.to_array().to_vec()))
                    .build()
            },
        )
    }
}

/// Where a lodestone compass points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodestoneTracker {
    /// Target lodestone; `None` spins the needle.
    pub target: Option<GlobalPosition>,
    /// Whether the target is cleared when the lodestone is broken.
    pub tracked: bool,
}

impl LodestoneTracker {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let target = GlobalPosition::network_type().optional();
        let target_out = target.clone();
        NetworkType::new(
            move |buf| {
                Ok(LodestoneTracker {
                    target: target.read(buf)?,
                    tracked: buf.read_bool()?,
                })
            },
            move |buf, tracker: &LodestoneTracker| {
                target_out.write(buf, &tracker.target)?;
                buf.write_bool(tracker.tracked);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(LodestoneTracker {
                    target: fields.read_opt("target", &GlobalPosition::tag_serializer())?,
                    tracked: fields.bool_or("tracked", true)?,
                })
            },
            |tracker: &LodestoneTracker| {
                CompoundBuilder::new()
                    .put_opt(
                        "target",
                        tracker
                            .target
                            .as_ref()
                            .map(|target| GlobalPosition::tag_serializer().write(target)),
                    )
                    .put("tracked", tracker.tracked)
                    .build()
            },
        )
    }
}
