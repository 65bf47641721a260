//=========================================================================
// Platform Manager
//=========================================================================
//
// Host facts resolved once at startup: where the executable lives and
// which OS it runs on. Screens use `base_path()` to locate data next to
// the binary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== PlatformService =====================================================

pub trait PlatformService: Subsystem {
    /// Directory containing the running executable.
    fn base_path(&self) -> &Path;

    /// Target OS name (`"linux"`, `"windows"`, `"macos"`, ...).
    fn os(&self) -> &'static str;
}

//=== PlatformManager =====================================================

pub struct PlatformManager {
    base_path: PathBuf,
    os: &'static str,
}

impl PlatformManager {
    /// Resolves the executable directory, falling back to the working
    /// directory when the OS does not report it.
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| {
                warn!(target: "platform", "Executable path unavailable, using current directory");
                PathBuf::from(".")
            });

        Self::with_base_path(base_path)
    }

    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        let manager = Self {
            base_path: base_path.into(),
            os: std::env::consts::OS,
        };
        info!(
            target: "platform",
            "Platform {} (base path {})",
            manager.os,
            manager.base_path.display()
        );
        manager
    }
}

impl Default for PlatformManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformService for PlatformManager {
    fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn os(&self) -> &'static str {
        self.os
    }
}

impl Subsystem for PlatformManager {
    fn name(&self) -> &'static str {
        "platform"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
