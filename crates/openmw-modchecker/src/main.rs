use camino::Utf8PathBuf;
use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser};
use commands::{check_mods, CheckModsArgs};
use errors::CliError;
use miette::Result;
use report::ReportOptions;
use utils::config::{default_openmw_cfg_path, DEFAULT_LEFTOVER_LIMIT};

mod commands;
mod errors;
mod report;
mod utils;

/// Exit code used when the scan is interrupted with Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 2;

/// Scan mod directories to determine if an entire mod is being overwritten by
/// something later in the load order. Checks all found mods by default.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the base mod directory containing all other mods
    #[arg(short = 'D', long)]
    base_mod_dir: Utf8PathBuf,

    /// Path to an openmw.cfg file [default: <config dir>/openmw/openmw.cfg]
    #[arg(short = 'f', long = "openmw-cfg-file", value_name = "CFG FILE")]
    openmw_cfg: Option<Utf8PathBuf>,

    /// Directory name of a single mod to be checked
    #[arg(short, long)]
    mod_dir_name: Option<String>,

    /// Print out (a lot) more information about what's going on
    #[arg(short, long)]
    verbose: bool,

    /// Like --verbose, and list every leftover file no matter how many
    #[arg(long)]
    very_verbose: bool,

    /// List leftover files of a kept mod when fewer than this many remain
    #[arg(long, default_value_t = DEFAULT_LEFTOVER_LIMIT)]
    leftover_limit: usize,
}

fn parse_args() -> Args {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn main() -> Result<()> {
    let args = parse_args();

    ctrlc::set_handler(|| {
        println!("  CTRL-C DETECTED! EXITING...");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(CliError::signal_handler)?;

    let verbose = args.verbose || args.very_verbose;
    utils::logging::init_logging(verbose);
    tracing::debug!("VERBOSE ON!");

    let config_path = match args.openmw_cfg {
        Some(path) => path,
        None => default_openmw_cfg_path().ok_or(CliError::NoDefaultConfigPath)?,
    };

    check_mods(CheckModsArgs {
        base_mod_dir: args.base_mod_dir,
        config_path,
        single_mod: args.mod_dir_name,
        report: ReportOptions {
            very_verbose: args.very_verbose,
            leftover_limit: args.leftover_limit,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let args = Args::try_parse_from([
            "openmw-modchecker",
            "-D",
            "/games/mods",
            "-f",
            "/tmp/openmw.cfg",
            "-m",
            "BetterHeads",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.base_mod_dir, Utf8PathBuf::from("/games/mods"));
        assert_eq!(args.openmw_cfg, Some(Utf8PathBuf::from("/tmp/openmw.cfg")));
        assert_eq!(args.mod_dir_name.as_deref(), Some("BetterHeads"));
        assert!(args.verbose);
        assert!(!args.very_verbose);
        assert_eq!(args.leftover_limit, DEFAULT_LEFTOVER_LIMIT);
    }

    #[test]
    fn test_base_mod_dir_is_required() {
        assert!(Args::try_parse_from(["openmw-modchecker", "-v"]).is_err());
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Args::try_parse_from([
            "openmw-modchecker",
            "--base-mod-dir",
            "/games/mods",
            "--openmw-cfg-file",
            "/tmp/openmw.cfg",
            "--very-verbose",
            "--leftover-limit",
            "10",
        ])
        .unwrap();

        assert!(args.very_verbose);
        assert_eq!(args.leftover_limit, 10);
        assert_eq!(args.mod_dir_name, None);
    }

    #[test]
    fn test_args_debug_assert() {
        Args::command().debug_assert();
    }
}
