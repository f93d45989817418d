use miette::Diagnostic;
use thiserror::Error;

/// Main error type for traitmix operations
#[derive(Error, Diagnostic, Debug)]
pub enum MixError {
    #[error("IO error: {0}")]
    #[diagnostic(code(traitmix::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(traitmix::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(traitmix::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(traitmix::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Gave up after {retries} retries looking for unique combination #{index}")]
    #[diagnostic(
        code(traitmix::exhausted),
        help("Lower the count, add variants, or raise max_retries")
    )]
    Exhaustion { index: usize, retries: u64 },

    #[error("Asset error in trait '{trait_name}', variant '{variant}': {message}")]
    #[diagnostic(code(traitmix::asset))]
    Asset {
        trait_name: String,
        variant: String,
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl MixError {
    /// Shorthand for an I/O failure tied to a path.
    pub fn io(path: &std::path::Path, message: impl Into<String>) -> Self {
        MixError::Io {
            path: path.to_path_buf(),
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        MixError::Config {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
