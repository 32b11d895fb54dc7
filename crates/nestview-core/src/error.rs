mod internal;
mod name_collision;

use internal::InternalError;
use name_collision::NameCollisionError;

/// Helper macro for returning early with an ad-hoc error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating an ad-hoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while decomposing a document into views.
///
/// All errors are fatal for the document being processed: the core never
/// retries, and no partial view or join output is handed to the serializer
/// once an error has been returned.
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    /// Interop with collaborators that report `anyhow` errors.
    Anyhow(anyhow::Error),

    /// A programming-invariant violation, never an input-data condition.
    Internal(InternalError),

    /// Collision resolution exhausted its single rename attempt.
    NameCollision(NameCollisionError),
}

impl Error {
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        match args.as_str() {
            Some(s) => Self::from(ErrorKind::Anyhow(anyhow::Error::msg(s))),
            None => Self::from(ErrorKind::Anyhow(anyhow::Error::msg(args.to_string()))),
        }
    }

    fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::from(ErrorKind::Anyhow(err))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind() {
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Internal(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::NameCollision(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}
