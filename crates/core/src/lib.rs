#![warn(missing_docs)]
//! Core primitives shared across the workspace: namespaced keys, the
//! sequential identifier registry, the tag tree, and the value types codecs
//! exchange with the rest of the game.

pub mod block;
pub mod color;
pub mod enums;
pub mod error;
pub mod item;
pub mod position;
pub mod registry;
pub mod tag;
pub mod text;

pub use block::{Block, BlockStateTable, BlockStates};
pub use color::{Color, DyeColor};
pub use enums::ProtocolEnum;
pub use error::{Channel, CodecError, CodecResult};
pub use item::ItemStack;
pub use position::BlockPosition;
pub use registry::{IdRegistry, RegistryError, RegistryKey, DEFAULT_NAMESPACE};
pub use tag::{Compound, CompoundBuilder, CompoundReader, Tag, TagSerializer};
pub use text::Text;
