//! Save, world and data directory resolution.
//!
//! Mirrors the game's own layout: a save directory contains a `world/`
//! subdirectory with the area files, and an exported copy of the game data
//! usually sits next to the save. Only the save location is required; the
//! other two are derived when not given explicitly.

use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Paths {
    pub save: PathBuf,
    pub world: PathBuf,
    /// `None` when no exported data directory exists; template resolution is
    /// disabled in that case rather than failing.
    pub data: Option<PathBuf>,
}

impl Paths {
    pub fn resolve(
        save: Option<PathBuf>,
        world: Option<PathBuf>,
        data: Option<PathBuf>,
    ) -> Result<Paths> {
        let save = match save {
            Some(save) => save,
            None => default_save_dir().ok_or_else(|| {
                Error::Io(
                    "no save path given and no default save location found; \
                     pass --save /path/to/save00"
                        .into(),
                )
            })?,
        };

        let world = world.unwrap_or_else(|| save.join("world"));
        let data = data
            .or_else(|| save.parent().map(|p| p.join("data")))
            .filter(|d| d.is_dir());

        info!(save = %save.display(), world = %world.display(), "resolved save paths");
        match &data {
            Some(data) => info!(data = %data.display(), "resolved data path"),
            None => info!("no data directory found, template resolution disabled"),
        }

        Ok(Paths { save, world, data })
    }
}

/// Default save location of a standard Windows install. The game writes
/// under `AppData/LocalLow`, the sibling of the directory `dirs` reports.
fn default_save_dir() -> Option<PathBuf> {
    let local = dirs::data_local_dir()?;
    let save = local
        .parent()?
        .join("LocalLow")
        .join("Nolla_Games_Noita")
        .join("save00");
    save.is_dir().then_some(save)
}
