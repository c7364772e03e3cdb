use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, filtering or rendering plot data.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("trajectory has no samples, cannot take its final timestamp")]
    EmptyTrajectory,
    #[error("no wind field samples at t = {t}, nothing to triangulate")]
    EmptySurface { t: f64 },
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("render failed: {0}")]
    Render(String),
}

/// Coarse grouping of [`PlotError`] used when reporting to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Parse,
    Precondition,
    Config,
    Render,
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::Io { .. } => ErrorKind::Input,
            PlotError::Parse { .. } => ErrorKind::Parse,
            // csv wraps its own io errors
            PlotError::Csv { source, .. } => match source.kind() {
                csv::ErrorKind::Io(_) => ErrorKind::Input,
                _ => ErrorKind::Parse,
            },
            PlotError::EmptyTrajectory | PlotError::EmptySurface { .. } => {
                ErrorKind::Precondition
            }
            PlotError::Config { .. } => ErrorKind::Config,
            PlotError::Render(_) => ErrorKind::Render,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Input => "input",
            ErrorKind::Parse => "parse",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Config => "config",
            ErrorKind::Render => "render",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
