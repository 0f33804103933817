use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("{path} could not be found!")]
    #[diagnostic(
        code(config::not_found),
        help("Pass the location of your openmw.cfg with --openmw-cfg-file")
    )]
    ConfigNotFound { path: Utf8PathBuf },

    #[error("There are no data paths in the given cfg file")]
    #[diagnostic(
        code(config::empty_load_order),
        help("Add your mods to {path} as data=\"/path/to/mod\" lines")
    )]
    EmptyLoadOrder { path: Utf8PathBuf },

    #[error("Could not read {path}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that the file is readable and is valid UTF-8")
    )]
    ConfigReadFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the default openmw.cfg location")]
    #[diagnostic(
        code(config::no_default_path),
        help("Pass the location of your openmw.cfg with --openmw-cfg-file")
    )]
    NoDefaultConfigPath,

    #[error("Failed to install the Ctrl-C handler")]
    #[diagnostic(code(signal::handler_failed))]
    SignalHandler {
        #[source]
        source: ctrlc::Error,
    },
}

impl CliError {
    /// Attach the config path to a load order error.
    pub fn from_load_order(err: omw_modcheck::Error, path: &Utf8Path) -> Self {
        let path = path.to_path_buf();
        match err {
            omw_modcheck::Error::ConfigNotFound(path) => Self::ConfigNotFound { path },
            omw_modcheck::Error::EmptyLoadOrder => Self::EmptyLoadOrder { path },
            omw_modcheck::Error::Io(source) => Self::ConfigReadFailed { path, source },
        }
    }

    pub fn signal_handler(source: ctrlc::Error) -> Self {
        Self::SignalHandler { source }
    }
}
