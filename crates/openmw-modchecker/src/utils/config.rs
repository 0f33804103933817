//! Defaults for locating OpenMW configuration.

use camino::Utf8PathBuf;
use directories_next::BaseDirs;

/// Leftover files are listed only when fewer than this many remain.
pub const DEFAULT_LEFTOVER_LIMIT: usize = 50;

/// Returns `<user config dir>/openmw/openmw.cfg`, e.g.
/// `~/.config/openmw/openmw.cfg` on Linux.
pub fn default_openmw_cfg_path() -> Option<Utf8PathBuf> {
    let dirs = BaseDirs::new()?;
    let config_dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    Some(config_dir.join("openmw").join("openmw.cfg"))
}
