//! Explorer error types.
//!
//! Two families live here:
//!
//! - [`ExplorerError`]: failures of explorer operations themselves (routes
//!   outside the catalog, unreadable settings, client setup)
//! - [`FetchFailure`]: a cloneable snapshot of a backend failure, carried in
//!   messages and view state so the UI can render it and offer a retry

use std::path::PathBuf;

use nsc_client::ClientError;
use thiserror::Error;

/// Explorer operation error.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The URL does not belong to the catalog listing route.
    #[error("route is outside the catalog listing: {0}")]
    ForeignRoute(String),

    /// The URL could not be parsed at all.
    #[error("invalid catalog URL {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// Settings file could not be read.
    #[error("failed to read settings file: {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`ExplorerSettings`](crate::ExplorerSettings).
    #[error("invalid settings file: {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The backend client could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ExplorerError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::ForeignRoute(_) | Self::InvalidUrl { .. } => {
                "Esta dirección no corresponde al catálogo.".to_string()
            }
            Self::SettingsIo { path, .. } => {
                format!("No se pudo leer la configuración en {}", path.display())
            }
            Self::SettingsParse { path, .. } => {
                format!("La configuración en {} no es válida", path.display())
            }
            Self::Client(err) => err.user_message().to_string(),
        }
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// A backend failure as the explorer keeps it.
///
/// Unlike [`ClientError`] this is `Clone + PartialEq`, so it can travel in
/// messages and be compared in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Message for the user.
    pub message: String,
    /// Technical detail for logs.
    pub detail: String,
    /// Whether retrying may help.
    pub retryable: bool,
}

impl FetchFailure {
    /// Build a failure from a message and detail.
    pub fn new(message: impl Into<String>, detail: impl Into<String>, retryable: bool) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
            retryable,
        }
    }
}

impl From<&ClientError> for FetchFailure {
    fn from(err: &ClientError) -> Self {
        Self {
            message: err.user_message().to_string(),
            detail: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl From<ClientError> for FetchFailure {
    fn from(err: ClientError) -> Self {
        Self::from(&err)
    }
}
