//=========================================================================
// Asset Manager
//=========================================================================
//
// Byte cache for files under a configured asset root.
//
// `load()` reads a file once and hands out shared `Arc<[u8]>` handles on
// every later call. Decoding is left to the caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== AssetError ==========================================================

/// Errors returned by [`AssetService::load`].
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The path is absolute or climbs out of the asset root.
    #[error("asset path escapes the asset root: {}", .0.display())]
    OutsideRoot(PathBuf),

    /// The file could not be read.
    #[error("failed to read asset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//=== AssetService ========================================================

/// Asset contract available to screens.
pub trait AssetService: Subsystem {
    /// Returns the bytes of `path` (relative to the asset root), reading
    /// the file only on the first request.
    fn load(&mut self, path: &str) -> Result<Arc<[u8]>, AssetError>;

    /// Drops the cached copy of `path`. Returns `false` if it was not cached.
    fn unload(&mut self, path: &str) -> bool;

    fn loaded_count(&self) -> usize;
}

//=== AssetManager ========================================================

pub struct AssetManager {
    root: PathBuf,
    cache: HashMap<String, Arc<[u8]>>,
}

impl AssetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        info!(target: "assets", "Asset root: {}", root.display());
        Self {
            root,
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(AssetError::OutsideRoot(relative.to_path_buf()));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetService for AssetManager {
    fn load(&mut self, path: &str) -> Result<Arc<[u8]>, AssetError> {
        if let Some(bytes) = self.cache.get(path) {
            return Ok(Arc::clone(bytes));
        }

        let full = self.resolve(path)?;
        let bytes: Arc<[u8]> = std::fs::read(&full)
            .map_err(|source| AssetError::Read { path: full.clone(), source })?
            .into();

        debug!(target: "assets", "Loaded {} ({} bytes)", path, bytes.len());
        self.cache.insert(path.to_owned(), Arc::clone(&bytes));
        Ok(bytes)
    }

    fn unload(&mut self, path: &str) -> bool {
        self.cache.remove(path).is_some()
    }

    fn loaded_count(&self) -> usize {
        self.cache.len()
    }
}

impl Subsystem for AssetManager {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn release(&mut self) {
        debug!(target: "assets", "Releasing {} cached assets", self.cache.len());
        self.cache.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
