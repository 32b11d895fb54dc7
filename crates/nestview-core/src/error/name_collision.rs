use super::Error;

/// Error when a field name collision cannot be resolved.
///
/// Collision resolution performs exactly one rename attempt, appending the
/// conflict suffix. If the suffixed name is itself already taken within the
/// view, the two fields must not be silently dropped or merged; the document
/// fails instead.
#[derive(Debug)]
pub(super) struct NameCollisionError {
    view: Box<str>,
    name: Box<str>,
}

impl std::error::Error for NameCollisionError {}

impl core::fmt::Display for NameCollisionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unresolvable name collision in view `{}`: `{}` and its renamed form are both taken",
            self.view, self.name
        )
    }
}

impl Error {
    /// Creates an unresolvable name collision error.
    pub fn name_collision(view: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NameCollision(NameCollisionError {
            view: view.into().into(),
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolvable name collision.
    pub fn is_name_collision(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NameCollision(_))
    }
}
