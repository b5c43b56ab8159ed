use crate::core::io::egsinp::EgsinpError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Template file not found: {path}", path = path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Could not find expected input phase space file {path}", path = path.display())]
    MissingPhaseSpace { path: PathBuf },

    #[error("Command failed: \"{command}\"")]
    CommandFailed { command: String, output: String },

    #[error("Template error: {source}")]
    Template {
        #[from]
        source: EgsinpError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
