//! Entity template resolution and sprite extraction.
//!
//! Area files reference entities by virtual template path
//! (`data/entities/...`). The resolver maps those paths onto an exported
//! copy of the game's data directory, patches known-bad documents, and pulls
//! every `SpriteComponent` node out of the XML so the atlas can pack it.

pub mod patches;

use std::path::PathBuf;

use roxmltree::{Document, Node};

use crate::atlas::AtlasSink;
use crate::codec::WorldPos;
use crate::error::{Error, Result};

/// Virtual-path prefix shared by every resolvable template.
const DATA_PREFIX: &str = "data/";

/// Visual parameters pulled from one `SpriteComponent` node, bound to the
/// world position of the placement that referenced the template.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDescriptor {
    pub image_file: String,
    pub offset_x: f32,
    pub offset_y: f32,
    pub alpha: f32,
    pub z_index: f32,
    pub additive: bool,
    pub emissive: bool,
    pub position: WorldPos,
}

impl SpriteDescriptor {
    fn from_node(node: Node, position: WorldPos) -> Self {
        Self {
            image_file: node.attribute("image_file").unwrap_or_default().to_string(),
            offset_x: float_attr(node, "offset_x", 0.0),
            offset_y: float_attr(node, "offset_y", 0.0),
            alpha: float_attr(node, "alpha", 1.0),
            z_index: float_attr(node, "z_index", 0.0),
            additive: bool_attr(node, "additive"),
            emissive: bool_attr(node, "emissive"),
            position,
        }
    }
}

fn float_attr(node: Node, name: &str, default: f32) -> f32 {
    node.attribute(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn bool_attr(node: Node, name: &str) -> bool {
    matches!(node.attribute(name), Some("1") | Some("true"))
}

/// Resolves template paths against the exported game data directory and
/// feeds extracted sprites to the atlas collaborator.
///
/// Resolution is pure given fixed filesystem state: the same path and
/// position always produce the same descriptors.
#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    data_root: Option<PathBuf>,
}

impl TemplateResolver {
    /// `data_root` is the on-disk location of the game's `data/` namespace.
    /// `None` disables resolution entirely (no exported data available).
    pub fn new(data_root: Option<PathBuf>) -> Self {
        Self { data_root }
    }

    /// Resolve one template reference, handing each extracted sprite to
    /// `sink`. Returns how many descriptors were produced.
    ///
    /// Paths outside the `data/` namespace and templates with no file on
    /// disk yield zero descriptors; referencing optional or unexported
    /// content is normal, not an error. Unreadable files and XML that is
    /// still malformed after patching do fail.
    pub fn resolve<A: AtlasSink + ?Sized>(
        &self,
        template_path: &str,
        position: WorldPos,
        sink: &A,
    ) -> Result<usize> {
        let caseless = template_path.to_lowercase();

        let Some(relative) = caseless.strip_prefix(DATA_PREFIX) else {
            return Ok(0);
        };
        let Some(root) = &self.data_root else {
            return Ok(0);
        };

        let full_path = root.join(relative);
        if !full_path.is_file() {
            return Ok(0);
        }

        let content = std::fs::read_to_string(&full_path)
            .map_err(|e| Error::Io(format!("{}: {e}", full_path.display())))?;
        let content = patches::apply_patches(template_path, content);

        let doc = Document::parse(&content).map_err(|e| Error::TemplateParse {
            path: template_path.to_string(),
            message: e.to_string(),
        })?;

        let mut count = 0;
        for node in doc
            .descendants()
            .filter(|n| n.has_tag_name("SpriteComponent"))
        {
            sink.add_atlas_object(SpriteDescriptor::from_node(node, position));
            count += 1;
        }

        Ok(count)
    }
}
