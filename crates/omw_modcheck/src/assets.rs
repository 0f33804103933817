//! Asset enumeration for mod directories.
//!
//! A mod contributes a file to the VFS comparison when the file's full path
//! contains one of the [`ASSET_DIRS`] names. The check is a plain substring
//! test on the lower-cased path, not a path segment match:
//!
//! ```text
//! OpenMWMods/HD Textures/readme.txt      -> counted ("textures" in the mod root name)
//! OpenMWMods/Foo/meshes/x/a.nif          -> counted
//! OpenMWMods/Foo/soundtrack/intro.mp3    -> counted ("sound" is a substring)
//! OpenMWMods/Foo/docs/readme.txt         -> ignored
//! ```
//!
//! This is a heuristic. It over-counts files in mods whose names contain a
//! category word, and it cannot tell `meshes/a/x.nif` from `meshes/b/x.nif`
//! since only the lower-cased base name is kept.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use walkdir::WalkDir;

/// Directory names the game treats as asset containers.
pub const ASSET_DIRS: [&str; 8] = [
    "bookart", "fonts", "icons", "meshes", "music", "sound", "splash", "textures",
];

/// Lower-cased base names of the asset files a mod contributes.
pub type AssetFileSet = HashSet<String>;

/// Provides the asset set of a mod by its identifier.
///
/// The analyzer only ever asks for mods by name; how that name maps to
/// content is up to the implementor. [`FsAssetSource`] resolves names against
/// a base mod directory on disk.
pub trait AssetSource {
    /// Return the asset set for `mod_name`. Unknown mods yield an empty set.
    fn assets(&self, mod_name: &str) -> AssetFileSet;
}

/// Filesystem-backed asset source.
///
/// Every mod is expected to live directly under `base_dir`:
///
/// ```text
/// base_dir/
///   BetterHeads/
///     meshes/b/b_n_dark elf_m_head_01.nif
///   HDTextures/
///     textures/tx_ashland_01.dds
/// ```
pub struct FsAssetSource {
    base_dir: Utf8PathBuf,
}

impl FsAssetSource {
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }
}

impl AssetSource for FsAssetSource {
    fn assets(&self, mod_name: &str) -> AssetFileSet {
        enumerate_assets(&self.base_dir.join(mod_name))
    }
}

/// Recursively collect the asset files under `mod_dir`.
///
/// A missing directory returns an empty set. Entries that cannot be read are
/// skipped, so an unreadable subtree simply contributes nothing.
pub fn enumerate_assets(mod_dir: &Utf8Path) -> AssetFileSet {
    let mut files = AssetFileSet::new();

    if !mod_dir.as_std_path().is_dir() {
        tracing::debug!("Mod directory '{}' does not exist", mod_dir);
        return files;
    }

    for entry in WalkDir::new(mod_dir.as_std_path()) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::trace!("Skipping unreadable entry under '{}': {}", mod_dir, e);
                continue;
            }
        };

        let file_type = entry.file_type();
        let is_file =
            file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!("Skipping non-UTF-8 path: {}", entry.path().display());
            continue;
        };

        let lowered = path.as_str().to_lowercase();
        if !ASSET_DIRS.iter().any(|dir| lowered.contains(dir)) {
            continue;
        }

        if let Some(name) = path.file_name() {
            files.insert(name.to_lowercase());
        }
    }

    files
}
