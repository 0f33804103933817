//! Error types for load order analysis.
//!
//! Only building the [`LoadOrder`](crate::LoadOrder) can fail. A mod with no
//! files or a mod missing from the load order is a
//! [`ShadowStatus`](crate::ShadowStatus), not an error.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading the load order.
#[derive(Error, Debug)]
pub enum Error {
    /// The `openmw.cfg` path does not point to an existing file.
    #[error("{0} could not be found!")]
    ConfigNotFound(Utf8PathBuf),

    /// The config was read but declared no usable `data=` paths.
    #[error("There are no data paths in the given cfg file")]
    EmptyLoadOrder,

    /// Reading the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
