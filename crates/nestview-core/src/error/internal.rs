use super::Error;

/// Error when the hierarchy builder and a downstream stage disagree about
/// document structure.
///
/// This occurs when:
/// - A repeated-group node has no resolvable parent view even after falling
///   back to the root view
/// - A view references a node that was never registered in the hierarchy
///
/// These are programming-invariant violations. They abort document
/// processing and are never a recoverable input-data condition.
#[derive(Debug)]
pub(super) struct InternalError {
    message: Box<str>,
}

impl std::error::Error for InternalError {}

impl core::fmt::Display for InternalError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "internal consistency violation: {}", self.message)
    }
}

impl Error {
    /// Creates an internal consistency error.
    pub fn internal(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Internal(InternalError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an internal consistency error.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Internal(_))
    }
}
