//! Area entity container: background decoding and per-tick publication.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::atlas::AtlasSink;
use crate::codec::area::{parse_area, AreaFile, EntityTypeRecord};
use crate::compress::load_compressed_file;
use crate::error::{Error, Result};
use crate::state::entity::AreaEntity;
use crate::state::queue::{publish_queue, PublishQueue, PublishSender};
use crate::template::TemplateResolver;

/// Loader half: decodes area files and publishes the results. Clone one per
/// background thread; the publish queue is the only thing shared with the
/// owning container.
pub struct AreaLoader<A> {
    tx: PublishSender<AreaEntity>,
    resolver: TemplateResolver,
    atlas: Arc<A>,
}

impl<A> Clone for AreaLoader<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            resolver: self.resolver.clone(),
            atlas: Arc::clone(&self.atlas),
        }
    }
}

impl<A: AtlasSink> AreaLoader<A> {
    /// Decode one area file and publish every placement it contains.
    ///
    /// Codec failures abort the whole file: a buffer whose fixed grammar
    /// cannot be walked has no meaningful partial result. A failure while
    /// emitting one entity type (missing position index, unreadable or
    /// malformed template) is logged and that type is skipped; the remaining
    /// types still load, and entities already published stay published.
    pub fn load_area(&self, path: &Path) -> Result<()> {
        let data = load_compressed_file(path)?;
        self.load_area_bytes(&data, &path.display().to_string())
    }

    /// Same as [`AreaLoader::load_area`] for a buffer that is already
    /// decompressed. `source` labels log output.
    pub fn load_area_bytes(&self, data: &[u8], source: &str) -> Result<()> {
        let area = parse_area(data)?;
        debug!(
            file = source,
            sentinel = area.header.sentinel,
            path_id = area.header.path_id,
            version = area.header.version,
            entity_types = area.entity_types.len(),
            "decoded area file"
        );

        for (index, record) in area.entity_types.iter().enumerate() {
            if let Err(e) = self.emit_entity_type(index as i32, record, &area) {
                warn!(
                    file = source,
                    template = %record.template_path,
                    error = %e,
                    "skipping entity type"
                );
            }
        }

        Ok(())
    }

    fn emit_entity_type(
        &self,
        index: i32,
        record: &EntityTypeRecord,
        area: &AreaFile,
    ) -> Result<()> {
        let positions = area
            .positions
            .get(&index)
            .ok_or(Error::MissingPositionIndex { index })?;

        for &position in positions {
            self.tx
                .push(AreaEntity::new(record.template_path.clone(), position));
            self.resolver
                .resolve(&record.template_path, position, self.atlas.as_ref())?;
        }

        Ok(())
    }
}

/// Owns the stable entity list and the tick half of the publish queue.
pub struct AreaContainer<A> {
    entities: Vec<AreaEntity>,
    queue: PublishQueue<AreaEntity>,
    loader: AreaLoader<A>,
}

impl<A: AtlasSink> AreaContainer<A> {
    pub fn new(resolver: TemplateResolver, atlas: Arc<A>) -> Self {
        let (tx, queue) = publish_queue();
        Self {
            entities: Vec::new(),
            queue,
            loader: AreaLoader { tx, resolver, atlas },
        }
    }

    /// Handle for a background thread to run [`AreaLoader::load_area`] on.
    pub fn loader(&self) -> AreaLoader<A> {
        self.loader.clone()
    }

    /// Tick step: move newly loaded entities into the stable list. Returns
    /// how many arrived since the last call.
    pub fn update(&mut self) -> usize {
        self.queue.drain_into(&mut self.entities)
    }

    /// Entities published so far, in arrival order.
    pub fn entities(&self) -> &[AreaEntity] {
        &self.entities
    }

    pub fn atlas(&self) -> &A {
        self.loader.atlas.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::CollectingAtlas;
    use crate::codec::{BinaryWriter, WorldPos};
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn encode_area(
        header: (i32, i32, i32),
        positions: &[(i32, f32, f32)],
        types: &[(&str, i32, i32)],
    ) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_i32_be(header.0);
        w.write_i32_be(header.1);
        w.write_i32_be(header.2);
        w.write_i32_be(positions.len() as i32);
        for &(index, x, y) in positions {
            w.write_i32_be(index);
            w.write_f32_be(x);
            w.write_f32_be(y);
        }
        w.write_i32_be(types.len() as i32);
        for &(path, aux_a, aux_b) in types {
            w.write_string_be(path);
            w.write_i32_be(aux_a);
            w.write_i32_be(aux_b);
        }
        w.into_vec()
    }

    fn container_without_data() -> AreaContainer<CollectingAtlas> {
        AreaContainer::new(TemplateResolver::new(None), Arc::new(CollectingAtlas::new()))
    }

    #[test]
    fn test_concrete_scenario_two_placements_one_type() {
        let data = encode_area(
            (0, 123, 1),
            &[(0, 1.0, 2.0), (0, 3.0, 4.0)],
            &[("data/entities/x.xml", 0, 0)],
        );

        let mut container = container_without_data();
        container.loader().load_area_bytes(&data, "area_test").unwrap();

        assert_eq!(container.update(), 2);
        let entities = container.entities();
        assert_eq!(entities[0].template_path, "data/entities/x.xml");
        assert_eq!(entities[0].position, WorldPos::new(1.0, 2.0));
        assert_eq!(entities[1].position, WorldPos::new(3.0, 4.0));

        // No exported data on disk: placements load, sprites do not.
        assert!(container.atlas().is_empty());
    }

    #[test]
    fn test_entity_count_matches_per_type_position_counts() {
        let data = encode_area(
            (0, 5, 1),
            &[(0, 1.0, 1.0), (1, 2.0, 2.0), (0, 3.0, 3.0), (2, 4.0, 4.0), (1, 5.0, 5.0)],
            &[
                ("data/entities/a.xml", 0, 0),
                ("data/entities/b.xml", 0, 0),
                ("data/entities/c.xml", 0, 0),
            ],
        );

        let mut container = container_without_data();
        container.loader().load_area_bytes(&data, "area_test").unwrap();

        assert_eq!(container.update(), 5);
    }

    #[test]
    fn test_missing_position_index_skips_only_that_type() {
        // Type 0 references an index with no recorded positions.
        let data = encode_area(
            (0, 9, 1),
            &[(1, 10.0, 20.0), (1, 30.0, 40.0)],
            &[
                ("data/entities/broken.xml", 0, 0),
                ("data/entities/ok.xml", 0, 0),
            ],
        );

        let mut container = container_without_data();
        container.loader().load_area_bytes(&data, "area_test").unwrap();

        assert_eq!(container.update(), 2);
        for entity in container.entities() {
            assert_eq!(entity.template_path, "data/entities/ok.xml");
        }
    }

    #[test]
    fn test_template_failure_keeps_entities_already_published() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("entities")).unwrap();
        fs::write(dir.path().join("entities/bad.xml"), "<Entity><Broken>").unwrap();

        let data = encode_area(
            (0, 9, 1),
            &[(0, 1.0, 1.0), (0, 2.0, 2.0), (1, 3.0, 3.0)],
            &[
                ("data/entities/bad.xml", 0, 0),
                ("data/entities/absent.xml", 0, 0),
            ],
        );

        let resolver = TemplateResolver::new(Some(dir.path().to_path_buf()));
        let mut container =
            AreaContainer::new(resolver, Arc::new(CollectingAtlas::new()));
        container.loader().load_area_bytes(&data, "area_test").unwrap();

        // The bad type's first entity was published before its template
        // failed to parse; there is no rollback. The second type still loads.
        assert_eq!(container.update(), 2);
        assert_eq!(container.entities()[0].template_path, "data/entities/bad.xml");
        assert_eq!(container.entities()[1].template_path, "data/entities/absent.xml");
    }

    #[test]
    fn test_within_type_position_order_is_preserved() {
        let positions: Vec<(i32, f32, f32)> =
            (0..20).map(|i| (0, i as f32, 0.0)).collect();
        let data = encode_area((0, 1, 1), &positions, &[("data/entities/a.xml", 0, 0)]);

        let mut container = container_without_data();
        container.loader().load_area_bytes(&data, "area_test").unwrap();
        container.update();

        for (i, entity) in container.entities().iter().enumerate() {
            assert_eq!(entity.position.x, i as f32);
        }
    }

    #[test]
    fn test_sprites_reach_the_atlas_per_placement() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("entities")).unwrap();
        fs::write(
            dir.path().join("entities/prop.xml"),
            "<Entity>\
               <SpriteComponent image_file=\"data/a.png\" />\
               <SpriteComponent image_file=\"data/b.png\" />\
             </Entity>",
        )
        .unwrap();

        let data = encode_area(
            (0, 1, 1),
            &[(0, 1.0, 2.0), (0, 3.0, 4.0), (0, 5.0, 6.0)],
            &[("data/entities/prop.xml", 0, 0)],
        );

        let atlas = Arc::new(CollectingAtlas::new());
        let resolver = TemplateResolver::new(Some(dir.path().to_path_buf()));
        let mut container = AreaContainer::new(resolver, Arc::clone(&atlas));
        container.loader().load_area_bytes(&data, "area_test").unwrap();
        container.update();

        assert_eq!(container.entities().len(), 3);
        // Two sprite components, three placements.
        let sprites = atlas.take();
        assert_eq!(sprites.len(), 6);
        assert_eq!(sprites[0].image_file, "data/a.png");
        assert_eq!(sprites[0].position, WorldPos::new(1.0, 2.0));
        assert_eq!(sprites[1].image_file, "data/b.png");
        assert_eq!(sprites[1].position, WorldPos::new(1.0, 2.0));
    }

    #[test]
    fn test_truncated_buffer_aborts_the_whole_file() {
        let data = encode_area((0, 1, 1), &[(0, 1.0, 1.0)], &[("data/entities/a.xml", 0, 0)]);
        let mut container = container_without_data();

        let result = container
            .loader()
            .load_area_bytes(&data[..data.len() - 3], "area_test");
        assert!(matches!(result, Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_load_compressed_area_from_background_thread() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("area_128_-64.bin");

        let raw = encode_area(
            (0, 77, 1),
            &[(0, 1.0, 2.0), (0, 3.0, 4.0)],
            &[("data/entities/x.xml", 0, 0)],
        );
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let mut container = container_without_data();
        let loader = container.loader();
        let worker = std::thread::spawn(move || loader.load_area(&path));
        worker.join().unwrap().unwrap();

        assert_eq!(container.update(), 2);
        assert_eq!(container.entities().len(), 2);
        assert_eq!(container.entities()[0].position, WorldPos::new(1.0, 2.0));
    }
}
