//! Shadowing analysis.
//!
//! # Algorithm
//!
//! For a target mod `M`:
//!
//! 1. Enumerate `M`'s assets. No assets means there is nothing to check
//!    ([`ShadowStatus::NoFiles`]).
//! 2. Find the first load order position whose path names `M`. No match gives
//!    [`ShadowStatus::NotInLoadOrder`].
//! 3. Copy `M`'s assets into a working set and walk every entry after that
//!    position. Entries whose identifier equals `M` are skipped, so duplicate
//!    declarations of the same mod never shadow themselves.
//! 4. Each file of a later mod that is still in the working set is removed,
//!    and the later mod is recorded as an overrider (first-seen order).
//! 5. The walk stops as soon as the working set is empty
//!    ([`ShadowStatus::SafeToRemove`]). Reaching the end of the load order with
//!    files left gives [`ShadowStatus::MustKeep`].
//!
//! Files are compared by lower-cased base name only, so `meshes/a/x.nif` in
//! one mod is shadowed by `textures/b/x.nif` in another.

use crate::assets::AssetSource;
use crate::load_order::LoadOrder;
use std::collections::BTreeSet;

/// Outcome of analyzing one mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowStatus {
    /// Every asset is overridden by later mods.
    SafeToRemove,
    /// Some assets are never overridden.
    MustKeep,
    /// The mod contributes no assets.
    NoFiles,
    /// The mod's identifier does not appear in the load order.
    NotInLoadOrder,
}

/// Result of [`ShadowAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowResult {
    /// Identifier of the analyzed mod.
    pub target: String,
    pub status: ShadowStatus,
    /// Load order position the walk started from, when the mod was found.
    pub position: Option<usize>,
    /// Number of assets the mod contributes.
    pub total_files: usize,
    /// Later mods that overrode at least one asset, in the order they were hit.
    pub overridden_by: Vec<String>,
    /// Assets no later mod overrides.
    pub remaining: BTreeSet<String>,
}

impl ShadowResult {
    fn new(target: &str, status: ShadowStatus) -> Self {
        Self {
            target: target.to_string(),
            status,
            position: None,
            total_files: 0,
            overridden_by: Vec::new(),
            remaining: BTreeSet::new(),
        }
    }

    pub fn remaining_file_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_safe_to_remove(&self) -> bool {
        self.status == ShadowStatus::SafeToRemove
    }
}

/// Decides whether mods are fully shadowed by later entries of a load order.
///
/// The analyzer borrows the load order and an [`AssetSource`]; it holds no
/// state between calls, so analyzing the same mod twice gives equal results
/// as long as the source does not change.
pub struct ShadowAnalyzer<'a, S: AssetSource + ?Sized> {
    load_order: &'a LoadOrder,
    source: &'a S,
}

impl<'a, S: AssetSource + ?Sized> ShadowAnalyzer<'a, S> {
    pub fn new(load_order: &'a LoadOrder, source: &'a S) -> Self {
        Self { load_order, source }
    }

    pub fn analyze(&self, target: &str) -> ShadowResult {
        let target_files = self.source.assets(target);
        tracing::debug!(
            "There are {} files in the mod '{}'",
            target_files.len(),
            target
        );
        if target_files.is_empty() {
            tracing::debug!("Mod {} has no files!", target);
            return ShadowResult::new(target, ShadowStatus::NoFiles);
        }

        let Some(position) = self.load_order.position_of(target) else {
            tracing::debug!("Mod '{}' is not declared in the load order", target);
            let mut result = ShadowResult::new(target, ShadowStatus::NotInLoadOrder);
            result.total_files = target_files.len();
            return result;
        };
        tracing::info!(
            "Found mod '{}' in the load order at position #{}, start checking now",
            target,
            position
        );

        let mut remaining = target_files.clone();
        let mut overridden_by: Vec<String> = Vec::new();

        for entry in self.load_order.entries_from(position + 1) {
            tracing::debug!("Load order #{}, path: {}", entry.position, entry.raw_line);
            tracing::debug!("Mod '{}' files left to check: {}", target, remaining.len());

            if entry.identifier == target {
                tracing::debug!(
                    "Mod '{}' appears again at #{}, skipping it",
                    target,
                    entry.position
                );
                continue;
            }

            let next_files = self.source.assets(&entry.identifier);
            if next_files.is_empty() {
                tracing::debug!("Mod '{}' has no files to check", entry.identifier);
                continue;
            }

            tracing::debug!(
                "Checking '{}' against '{}' ({} files)",
                target,
                entry.identifier,
                next_files.len()
            );

            let mut overrides_any = false;
            for file in &next_files {
                if remaining.remove(file) {
                    tracing::debug!(
                        "Mod '{}' overwrites file '{}' from the source mod '{}'",
                        entry.identifier,
                        file,
                        target
                    );
                    overrides_any = true;
                }
            }

            if !overrides_any {
                tracing::debug!(
                    "Mod '{}' does not overwrite mod '{}'!",
                    entry.identifier,
                    target
                );
            } else if !overridden_by.contains(&entry.identifier) {
                overridden_by.push(entry.identifier.clone());
            }

            if remaining.is_empty() {
                break;
            }
        }

        let status = if remaining.is_empty() {
            ShadowStatus::SafeToRemove
        } else {
            ShadowStatus::MustKeep
        };

        ShadowResult {
            target: target.to_string(),
            status,
            position: Some(position),
            total_files: target_files.len(),
            overridden_by,
            remaining: remaining.into_iter().collect(),
        }
    }
}
