//! Turns analysis results into log lines.

use crate::utils::config::DEFAULT_LEFTOVER_LIMIT;
use omw_modcheck::{ShadowResult, ShadowStatus};
use tracing::Level;

/// Verbosity knobs for result output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// List leftover files no matter how many there are.
    pub very_verbose: bool,
    /// Leftover files are listed when fewer than this many remain.
    pub leftover_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            very_verbose: false,
            leftover_limit: DEFAULT_LEFTOVER_LIMIT,
        }
    }
}

pub struct Reporter {
    options: ReportOptions,
}

impl Reporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn report(&self, result: &ShadowResult) {
        for (level, message) in self.render(result) {
            if level == Level::DEBUG {
                tracing::debug!("{}", message);
            } else {
                tracing::info!("{}", message);
            }
        }
    }

    fn lists_leftovers(&self, count: usize) -> bool {
        count < self.options.leftover_limit || self.options.very_verbose
    }

    pub fn render(&self, result: &ShadowResult) -> Vec<(Level, String)> {
        let target = &result.target;
        let mut lines = Vec::new();

        match result.status {
            // Logged by the analyzer before any walk happens.
            ShadowStatus::NoFiles => {}
            ShadowStatus::NotInLoadOrder => {
                lines.push((
                    Level::INFO,
                    format!("Mod '{}' was not found in the load order", target),
                ));
            }
            ShadowStatus::SafeToRemove => {
                lines.push((
                    Level::INFO,
                    format!("Mod '{}' has been overwritten by the following mods:", target),
                ));
                for overrider in &result.overridden_by {
                    lines.push((Level::INFO, format!("----> {}", overrider)));
                }
            }
            ShadowStatus::MustKeep => {
                let count = result.remaining_file_count();
                lines.push((
                    Level::INFO,
                    format!("Mod '{}' can stay, remaining filecount: {}", target, count),
                ));
                if self.lists_leftovers(count) {
                    lines.push((Level::DEBUG, "Leftover files list:".to_string()));
                    for file in &result.remaining {
                        lines.push((Level::DEBUG, format!("==> {}", file)));
                    }
                } else {
                    lines.push((Level::DEBUG, "Too many leftover files to list!".to_string()));
                }
            }
        }

        lines
    }
}
