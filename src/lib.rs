//! Noita world-save decoder
//!
//! A Rust library for decoding the area placement files in a Noita world
//! save and resolving each placement's entity template into atlas-ready
//! sprite descriptors.

pub mod atlas;
pub mod codec;
pub mod compress;
pub mod error;
pub mod paths;
pub mod state;
pub mod template;

pub use atlas::{AtlasSink, CollectingAtlas};
pub use codec::{
    parse_area, AreaFile, AreaHeader, BinaryReader, BinaryWriter, EntityTypeRecord, WorldPos,
};
pub use compress::{decompress_if_needed, load_compressed_file};
pub use error::{Error, Result};
pub use paths::Paths;
pub use state::{AreaContainer, AreaEntity, AreaLoader, PublishQueue, PublishSender};
pub use template::{SpriteDescriptor, TemplateResolver};
