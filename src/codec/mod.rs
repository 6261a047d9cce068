pub mod area;
pub mod reader;
pub mod types;
pub mod writer;

pub use area::{parse_area, AreaFile, AreaHeader, EntityTypeRecord};
pub use reader::BinaryReader;
pub use types::WorldPos;
pub use writer::BinaryWriter;
