use super::migration::MigrationError;

/// Error types for save/load operations
///
/// These are runtime conditions: they get logged and turned into a failed
/// save or a missing load, never a crash.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(String),

    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: String, supported: String },

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("Corrupted save data: {0}")]
    CorruptedData(String),
}

/// A slot number outside `1..=max`
///
/// This is a caller bug (a UI offering a slot that doesn't exist), so it is
/// returned to the caller instead of being folded into a failed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("save slot {slot} out of range 1..={max}")]
pub struct SlotRangeError {
    pub slot: u32,
    pub max: u32,
}
