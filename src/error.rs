use thiserror::Error;

/// Failures surfaced by [`crate::services::storage_service::StorageService`].
///
/// An unreachable store and a malformed document are both errors; only a
/// missing document reads as an empty collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("stored {key} is malformed: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no guru with id {0}")]
    UnknownGuru(String),

    #[error("report {0} already exists")]
    DuplicateReport(String),
}

impl StorageError {
    /// True when the stored data itself is bad and clearing the session
    /// would recover.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            StorageError::Malformed { .. } | StorageError::Invalid { .. }
        )
    }
}

/// Failures of the idle-session purge.
#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("idle window of {0} minutes is out of range")]
    IdleWindowOutOfRange(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
