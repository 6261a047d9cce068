//! Area file grammar.
//!
//! An area file records which entities the game spawned in one region of the
//! world: a short header, a position table keyed by entity-type index, then
//! the entity-type table itself. Everything is big-endian and read
//! sequentially with no backtracking; trailing bytes past the entity-type
//! table are left unread.

use ahash::AHashMap;

use crate::codec::reader::BinaryReader;
use crate::codec::types::WorldPos;
use crate::error::Result;

/// Leading header fields of an area file. The first is zero and the third is
/// one in every save observed; the second correlates with the file's name.
/// All three are decoded for diagnostics and never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaHeader {
    pub sentinel: i32,
    pub path_id: i32,
    pub version: i32,
}

/// One entry of the entity-type table. The ordinal of the entry is the key
/// into the position table; the two auxiliary values ride along undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeRecord {
    pub template_path: String,
    pub aux_a: i32,
    pub aux_b: i32,
}

/// Fully decoded area file.
#[derive(Debug, Clone)]
pub struct AreaFile {
    pub header: AreaHeader,
    pub positions: AHashMap<i32, Vec<WorldPos>>,
    pub entity_types: Vec<EntityTypeRecord>,
}

impl AreaFile {
    /// Number of placements the entity-type table can produce, counting only
    /// types whose index appears in the position table.
    pub fn placement_count(&self) -> usize {
        self.entity_types
            .iter()
            .enumerate()
            .filter_map(|(i, _)| self.positions.get(&(i as i32)))
            .map(Vec::len)
            .sum()
    }
}

/// Decode one area file from its decompressed bytes.
///
/// Position records append in file order under their index, so the per-index
/// sequences preserve the order the game wrote them in. Any short read fails
/// the whole parse; a file whose fixed grammar cannot be walked has no
/// meaningful partial result.
pub fn parse_area(data: &[u8]) -> Result<AreaFile> {
    let mut reader = BinaryReader::new(data);

    let header = AreaHeader {
        sentinel: reader.read_i32_be()?,
        path_id: reader.read_i32_be()?,
        version: reader.read_i32_be()?,
    };

    let position_count = reader.read_i32_be()?;
    let mut positions: AHashMap<i32, Vec<WorldPos>> = AHashMap::new();
    for _ in 0..position_count {
        let index = reader.read_i32_be()?;
        let pos = reader.read_world_pos()?;
        positions.entry(index).or_default().push(pos);
    }

    let entity_type_count = reader.read_i32_be()?;
    let mut entity_types = Vec::new();
    for _ in 0..entity_type_count {
        let template_path = reader.read_string_be()?;
        let aux_a = reader.read_i32_be()?;
        let aux_b = reader.read_i32_be()?;
        entity_types.push(EntityTypeRecord { template_path, aux_a, aux_b });
    }

    Ok(AreaFile { header, positions, entity_types })
}
