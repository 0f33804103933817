//! Load order shadowing analysis for OpenMW mods.
//!
//! OpenMW mounts every `data=` path from `openmw.cfg` into one virtual
//! filesystem. When two mods ship a file with the same name, the one declared
//! later wins. This crate answers a single question for each mod: is every
//! asset it ships overridden by something that loads after it? If so, the mod
//! can be dropped from the load order without changing what the game sees.
//!
//! - [`assets`]: enumerates the asset files a mod directory contributes
//! - [`load_order`]: parses `openmw.cfg` into an ordered [`LoadOrder`]
//! - [`analyzer`]: walks the load order and produces a [`ShadowResult`]
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use omw_modcheck::{FsAssetSource, LoadOrder, ShadowAnalyzer, ShadowStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let load_order = LoadOrder::build(Utf8Path::new("/home/me/.config/openmw/openmw.cfg"))?;
//! let source = FsAssetSource::new("/home/me/games/OpenMWMods");
//! let analyzer = ShadowAnalyzer::new(&load_order, &source);
//!
//! let result = analyzer.analyze("BetterHeads");
//! if result.status == ShadowStatus::SafeToRemove {
//!     println!("overridden by {:?}", result.overridden_by);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod assets;
pub mod error;
pub mod load_order;

pub use analyzer::{ShadowAnalyzer, ShadowResult, ShadowStatus};
pub use assets::{enumerate_assets, AssetFileSet, AssetSource, FsAssetSource, ASSET_DIRS};
pub use error::{Error, Result};
pub use load_order::{LoadOrder, LoadOrderEntry};
