use std::fmt;

/// Errors that abort construction. Everything else in the engine resolves to
/// a silent no-op or a fallback to the default position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The deck carries no sections; there is nothing to present.
    EmptyDeck,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyDeck => {
                write!(f, "ERROR: Deck contains no sections")
            }
        }
    }
}

impl std::error::Error for Error {}
