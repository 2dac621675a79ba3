//! Error types shared by the loader, terrain builder and settings store.

use std::io;
use std::path::PathBuf;

/// Reason a single record could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unable to parse face")]
    MalformedFace,
    #[error("unable to parse vertex")]
    MalformedVertex,
    #[error("unable to parse texture coordinate")]
    MalformedTexCoord,
    #[error("unable to parse normal")]
    MalformedNormal,
    #[error("index out of bound")]
    IndexOutOfBound,
    #[error("only triangles supported")]
    NotTriangle,
}

/// Everything that can end a model load early.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to open model file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("{kind} at line {line}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("Unable to load texture '{}': {reason}", path.display())]
    Texture { path: PathBuf, reason: String },

    #[error("loading cancelled")]
    Cancelled,
}

impl LoadError {
    pub fn parse(line: usize, kind: ParseErrorKind) -> Self {
        LoadError::Parse { line, kind }
    }

    /// Line number of the offending record, if the error came from the parser.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Read { line, .. } | LoadError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    #[error("plane size must be non-negative, got {z_size}x{x_size}")]
    InvalidPlaneSize { z_size: f32, x_size: f32 },
    #[error("plane {z_size}x{x_size} with cell size {cell_size} has too many vertices")]
    PlaneTooLarge {
        z_size: f32,
        x_size: f32,
        cell_size: f32,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("settings encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}
