use thiserror::Error;

/// Everything that can go wrong while serving tasks.
///
/// Unknown dates or ids on update/delete are deliberately NOT errors: those
/// requests are acknowledged as silent no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller sent something unusable (empty task name, impossible date...).
    #[error("{0}")]
    Validation(String),

    /// The backing file could not be read or written.
    #[error("could not access the store file: {0}")]
    StoreIo(#[from] std::io::Error),

    /// The backing file exists but does not parse as a task document.
    #[error("the store file is corrupt: {0}")]
    StoreCorrupt(#[from] serde_json::Error),
}
