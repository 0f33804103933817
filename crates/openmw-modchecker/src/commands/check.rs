use crate::errors::CliError;
use crate::report::{ReportOptions, Reporter};
use camino::{Utf8Path, Utf8PathBuf};
use miette::Result;
use omw_modcheck::{FsAssetSource, LoadOrder, ShadowAnalyzer};
use std::time::Instant;

pub const PROG: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct CheckModsArgs {
    pub base_mod_dir: Utf8PathBuf,
    pub config_path: Utf8PathBuf,
    pub single_mod: Option<String>,
    pub report: ReportOptions,
}

pub fn check_mods(args: CheckModsArgs) -> Result<()> {
    let start = Instant::now();
    tracing::info!("Begin scan - {} (v{})", PROG, VERSION);
    tracing::debug!("BASE MOD DIR: {}", args.base_mod_dir);
    tracing::debug!("OPENMW.CFG: {}", args.config_path);

    let load_order = LoadOrder::build(&args.config_path).map_err(|e| {
        let err = CliError::from_load_order(e, &args.config_path);
        tracing::error!("ERROR: {}", err);
        err
    })?;
    tracing::debug!("There are {} paths to check", load_order.len());

    let source = FsAssetSource::new(args.base_mod_dir.clone());
    let analyzer = ShadowAnalyzer::new(&load_order, &source);
    let reporter = Reporter::new(args.report);

    for target in scan_targets(&load_order, &args.base_mod_dir, args.single_mod.as_deref()) {
        let result = analyzer.analyze(&target);
        reporter.report(&result);
    }

    tracing::info!("End scan - {} (v{})", PROG, VERSION);
    let elapsed = start.elapsed().as_secs();
    tracing::debug!("Took {} minutes, {} seconds.", elapsed / 60, elapsed % 60);

    Ok(())
}

/// Mods to analyze, in load order.
///
/// With a single mod only that mod is returned, whether or not it is declared.
/// Otherwise every declared path except the base mod directory itself.
pub fn scan_targets(
    load_order: &LoadOrder,
    base_mod_dir: &Utf8Path,
    single_mod: Option<&str>,
) -> Vec<String> {
    if let Some(name) = single_mod {
        tracing::info!("Checking single mod: '{}'", name);
        return vec![name.to_string()];
    }

    load_order
        .iter()
        .filter(|entry| Utf8Path::new(&entry.path) != base_mod_dir)
        .map(|entry| entry.identifier.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::capture::{capture_logs, messages};
    use std::fs;
    use tracing::level_filters::LevelFilter;

    fn touch(root: &Utf8Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn cfg_for(paths: &[Utf8PathBuf]) -> String {
        paths
            .iter()
            .map(|p| format!("data=\"{}\"\n", p))
            .collect()
    }

    #[test]
    fn test_scan_targets_skips_base_dir() {
        let base = Utf8PathBuf::from("/games/mods");
        let cfg = cfg_for(&[
            base.join("A"),
            base.clone(),
            base.join("B"),
        ]);
        let load_order = LoadOrder::parse(&cfg).unwrap();

        assert_eq!(scan_targets(&load_order, &base, None), vec!["A", "B"]);
    }

    #[test]
    fn test_scan_targets_single_mod() {
        let base = Utf8PathBuf::from("/games/mods");
        let load_order = LoadOrder::parse(&cfg_for(&[base.join("A"), base.join("B")])).unwrap();

        assert_eq!(scan_targets(&load_order, &base, Some("B")), vec!["B"]);
        assert_eq!(scan_targets(&load_order, &base, Some("Z")), vec!["Z"]);
    }

    fn fixture(root: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
        let base = root.join("mods");
        touch(&base, "A/meshes/x.nif");
        touch(&base, "B/meshes/x.nif");
        let config_path = root.join("openmw.cfg");
        fs::write(&config_path, cfg_for(&[base.join("A"), base.join("B")])).unwrap();
        (base, config_path)
    }

    fn position(lines: &[&str], message: &str) -> usize {
        lines
            .iter()
            .position(|line| *line == message)
            .unwrap_or_else(|| panic!("missing log line {:?} in {:#?}", message, lines))
    }

    #[test]
    fn test_check_mods_reports_every_mod() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let (base, config_path) = fixture(root);

        let (result, output) = capture_logs(LevelFilter::INFO, || {
            check_mods(CheckModsArgs {
                base_mod_dir: base,
                config_path,
                single_mod: None,
                report: ReportOptions::default(),
            })
        });

        assert!(result.is_ok());
        let lines = messages(&output);
        let overwritten = position(&lines, "Mod 'A' has been overwritten by the following mods:");
        assert_eq!(lines[overwritten + 1], "----> B");
        position(&lines, "Mod 'B' can stay, remaining filecount: 1");
        let begin = format!("Begin scan - {} (v{})", PROG, VERSION);
        let end = format!("End scan - {} (v{})", PROG, VERSION);
        assert!(position(&lines, &begin) < overwritten);
        assert!(position(&lines, &end) > overwritten);
    }

    #[test]
    fn test_check_mods_logs_start_before_walk() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let (base, config_path) = fixture(root);

        let (result, output) = capture_logs(LevelFilter::DEBUG, || {
            check_mods(CheckModsArgs {
                base_mod_dir: base,
                config_path,
                single_mod: Some("A".to_string()),
                report: ReportOptions::default(),
            })
        });

        assert!(result.is_ok());
        let lines = messages(&output);
        let file_count = position(&lines, "There are 1 files in the mod 'A'");
        let found = position(
            &lines,
            "Found mod 'A' in the load order at position #1, start checking now",
        );
        let overwrite = position(&lines, "Mod 'B' overwrites file 'x.nif' from the source mod 'A'");
        let verdict = position(&lines, "Mod 'A' has been overwritten by the following mods:");
        let walk = lines
            .iter()
            .position(|line| line.starts_with("Load order #2, path: "))
            .unwrap();

        assert!(file_count < found);
        assert!(found < walk);
        assert!(walk < overwrite);
        assert!(overwrite < verdict);
    }

    #[test]
    fn test_check_mods_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let config_path = root.join("openmw.cfg");

        let (result, output) = capture_logs(LevelFilter::INFO, || {
            check_mods(CheckModsArgs {
                base_mod_dir: root.join("mods"),
                config_path: config_path.clone(),
                single_mod: Some("A".to_string()),
                report: ReportOptions::default(),
            })
        });

        let report = result.unwrap_err();
        assert!(matches!(
            report.downcast_ref::<CliError>(),
            Some(CliError::ConfigNotFound { path }) if *path == config_path
        ));
        let expected = format!("ERROR: {} could not be found!", config_path);
        assert!(messages(&output).contains(&expected.as_str()));
    }

    #[test]
    fn test_check_mods_empty_load_order_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let config_path = root.join("openmw.cfg");
        fs::write(&config_path, "content=Morrowind.esm\n").unwrap();

        let (result, output) = capture_logs(LevelFilter::INFO, || {
            check_mods(CheckModsArgs {
                base_mod_dir: root.join("mods"),
                config_path: config_path.clone(),
                single_mod: None,
                report: ReportOptions::default(),
            })
        });

        let report = result.unwrap_err();
        assert!(matches!(
            report.downcast_ref::<CliError>(),
            Some(CliError::EmptyLoadOrder { .. })
        ));
        assert!(messages(&output).contains(&"ERROR: There are no data paths in the given cfg file"));
    }
}
