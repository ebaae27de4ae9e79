use std::fmt;
use std::sync::Arc;

/// An error that can occur while deriving or migrating a denormalized
/// schema.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug, Clone)]
enum ErrorKind {
    /// Migration statement generation failed.
    Migration(String),

    /// An ad-hoc error surfaced by a collaborator.
    Anyhow(Arc<anyhow::Error>),
}

impl Error {
    /// Create an error describing a failed migration emission.
    pub fn migration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Migration(message.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Migration(message) => write!(fmt, "migration failed: {message}"),
            ErrorKind::Anyhow(error) => error.fmt(fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Anyhow(error) => {
                let source: &(dyn std::error::Error + Send + Sync + 'static) =
                    (**error).as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Anyhow(Arc::new(value)),
        }
    }
}
