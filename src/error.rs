use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphError {
    /// The two paths cannot be matched segment for segment.
    #[error("paths do not have the same length ({path1} vs {path2} segments)")]
    LengthMismatch { path1: usize, path2: usize },
    #[error("{what} index {index} is out of range (length {len})")]
    IndexOutOfRange { what: &'static str, index: usize, len: usize },
}

impl MorphError {
    pub(crate) fn check_lengths(path1: usize, path2: usize) -> Result<(), MorphError> {
        if path1 == path2 {
            Ok(())
        } else {
            Err(MorphError::LengthMismatch { path1, path2 })
        }
    }
}
