//! Load order parsing from `openmw.cfg`.
//!
//! OpenMW reads `data=` lines top to bottom and mounts each path into the VFS.
//! A later path overrides files of the same name from earlier ones, so line
//! order is load priority:
//!
//! ```text
//! data="/usr/share/games/morrowind/Data Files"   # stock data, skipped
//! data="/home/me/OpenMWMods/BetterHeads"         # position 1
//! data=/home/me/OpenMWMods/HDTextures            # position 2
//! content=Morrowind.esm                          # ignored
//! ```
//!
//! Mod identifiers are derived from the last path segment, which assumes the
//! directory name under the base mod directory matches the declared path.
//! Symlinked or trailing-separator paths can derive the wrong identifier.

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::path::MAIN_SEPARATOR;

/// Key prefix of a data path declaration.
const DATA_KEY: &str = "data=";

/// Final segment of the stock game data path.
const DATA_FILES_PLACEHOLDER: &str = "data files";

/// One accepted `data=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOrderEntry {
    /// 1-based position among accepted lines.
    pub position: usize,
    /// The config line as written, without the trailing newline.
    pub raw_line: String,
    /// The declared path with the key and wrapping quotes removed.
    pub path: String,
    /// Short mod name, the last segment of `path`.
    pub identifier: String,
}

/// Ordered list of data paths from an `openmw.cfg`.
///
/// Never empty: [`build`](Self::build) and [`parse`](Self::parse) fail with
/// [`Error::EmptyLoadOrder`] instead.
#[derive(Debug, Clone)]
pub struct LoadOrder {
    entries: Vec<LoadOrderEntry>,
}

impl LoadOrder {
    /// Read and parse the config file at `config_path`.
    pub fn build(config_path: &Utf8Path) -> Result<Self> {
        if !config_path.as_std_path().is_file() {
            return Err(Error::ConfigNotFound(config_path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(config_path.as_std_path())?;
        let load_order = Self::parse(&contents)?;

        tracing::debug!(
            "Read {} data paths from {}",
            load_order.len(),
            config_path
        );

        Ok(load_order)
    }

    /// Parse config text. Lines that are not `data=` declarations, and the
    /// stock `Data Files` path, do not take a position.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for line in contents.lines() {
            if !line.starts_with(DATA_KEY) {
                continue;
            }

            let path = declared_path(line);
            if is_data_files_placeholder(path) {
                tracing::trace!("Skipping stock data path: {}", line);
                continue;
            }

            entries.push(LoadOrderEntry {
                position: entries.len() + 1,
                raw_line: line.trim_end().to_string(),
                path: path.to_string(),
                identifier: identifier_for(line),
            });
        }

        if entries.is_empty() {
            return Err(Error::EmptyLoadOrder);
        }

        Ok(Self { entries })
    }

    /// Position of the first entry whose path contains `<sep><identifier>`.
    ///
    /// This is a substring test, so `Foo` also matches a path ending in
    /// `FooBar` if that entry comes first.
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        let needle = format!("{}{}", MAIN_SEPARATOR, identifier);
        self.entries
            .iter()
            .find(|entry| entry.path.contains(&needle))
            .map(|entry| entry.position)
    }

    /// Entries at or after `position`, in load order.
    pub fn entries_from(&self, position: usize) -> impl Iterator<Item = &LoadOrderEntry> + '_ {
        self.entries
            .iter()
            .skip_while(move |entry| entry.position < position)
    }

    pub fn entries(&self) -> &[LoadOrderEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadOrderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LoadOrder {
    type Item = &'a LoadOrderEntry;
    type IntoIter = std::slice::Iter<'a, LoadOrderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Strip the `data=` key, trailing whitespace and wrapping quotes.
fn declared_path(line: &str) -> &str {
    line.strip_prefix(DATA_KEY)
        .unwrap_or(line)
        .trim_end()
        .trim_matches(|c| c == '"' || c == '\'')
}

fn is_data_files_placeholder(path: &str) -> bool {
    last_segment(path).eq_ignore_ascii_case(DATA_FILES_PLACEHOLDER)
}

fn last_segment(path: &str) -> &str {
    path.rsplit(MAIN_SEPARATOR).next().unwrap_or(path)
}

/// Derive a mod identifier from a `data=` line.
///
/// `data="/mods/BetterHeads"` gives `BetterHeads`. A path with a trailing
/// separator gives an empty identifier.
pub fn identifier_for(line: &str) -> String {
    last_segment(declared_path(line)).to_string()
}
