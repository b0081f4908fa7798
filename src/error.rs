use thiserror::Error;

/// Failure taxonomy for a translation run.
///
/// `Parse` and `Io` are fatal for the file they occur in; the batch moves on
/// to the next module. `Service` is per-entry: the entry stays untranslated
/// and the run continues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("translation service error: {0}")]
    Service(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
