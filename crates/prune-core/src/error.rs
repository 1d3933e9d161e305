//! Error types for prune-core

/// Result type for prune-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading a prune plan
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The plan is structurally valid but cannot be run
    #[error("Invalid plan: {message}")]
    InvalidPlan { message: String },

    /// No plan file found in the searched directory
    #[error("No prune plan found in {dir}")]
    PlanNotFound { dir: std::path::PathBuf },

    /// Error from prune-blocks
    #[error(transparent)]
    Blocks(#[from] prune_blocks::Error),

    /// Error from prune-fs
    #[error(transparent)]
    Fs(#[from] prune_fs::Error),
}

impl Error {
    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            message: message.into(),
        }
    }
}
