use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Projection or indexing before any records were loaded
    NotLoaded,
    /// Search before move lists were attached
    NotIndexed,
    /// Move row count differs from the loaded record count
    LengthMismatch,
    /// Single-flight guard already held
    Busy,
    InvalidState,
    InvalidArgument,
    Parse,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn not_loaded() -> Self {
        Error::new(ErrorKind::NotLoaded, "Games haven't been loaded yet".to_string())
    }

    pub fn not_indexed() -> Self {
        Error::new(ErrorKind::NotIndexed, "Game moves haven't been loaded yet".to_string())
    }

    pub fn length_mismatch(got: usize, expected: usize) -> Self {
        Error::new(
            ErrorKind::LengthMismatch,
            format!("Wrong number of games: {} (expected {})", got, expected),
        )
    }

    pub fn busy(what: &str) -> Self {
        Error::new(ErrorKind::Busy, format!("{} already in progress", what))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
