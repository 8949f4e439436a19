use crate::error::TraitsError;

/// A privileged handle used by operator mutations, and an unprivileged
/// handle used by customer reads/writes. Rather than binding each
/// handle to a distinct database role with its own GRANTs, authority is
/// checked here in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Base,
    Admin,
}

impl Session {
    /// Fails with `InvalidArgument` when called through the base handle.
    pub fn require_admin(self) -> Result<(), TraitsError> {
        match self {
            Self::Admin => Ok(()),
            Self::Base => Err(TraitsError::invalid(
                "operation requires the admin handle",
            )),
        }
    }
}
