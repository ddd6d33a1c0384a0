use std::error;
use std::fmt;
use std::io;

use backtrace::Backtrace;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub enum ErrorKind {
    Io(io::Error),
    // The table already holds the maximum number of entries.
    CapacityExceeded { max_entries: usize },
    NotFound { section: Option<String>, key: String },
    // Lines were skipped while loading.
    Malformed { skipped: usize },
    // Rewriting the file would drop or shorten entries.
    LossyRewrite { lost: usize },
    Config(serde_yaml::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(err) => err.fmt(f),
            ErrorKind::CapacityExceeded { max_entries } => {
                write!(f, "table capacity({}) exceeded", max_entries)
            }
            ErrorKind::NotFound { section, key } => match section {
                Some(section) => write!(f, "[{}] {} not found", section, key),
                None => write!(f, "{} not found", key),
            },
            ErrorKind::Malformed { skipped } => write!(f, "{} lines skipped", skipped),
            ErrorKind::LossyRewrite { lost } => {
                write!(f, "refuse to rewrite, {} lines would be lost", lost)
            }
            ErrorKind::Config(err) => write!(f, "invalid config. {}", err),
            ErrorKind::Json(err) => write!(f, "json encode error. {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::from(ErrorKind::Io(err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::from(ErrorKind::Config(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::from(ErrorKind::Json(err))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::with_backtrace(kind)
    }
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::CapacityExceeded { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound { .. })
    }

    fn with_backtrace(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Some(Backtrace::new()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::Config(err) => Some(err),
            ErrorKind::Json(err) => Some(err),
            ErrorKind::CapacityExceeded { .. }
            | ErrorKind::NotFound { .. }
            | ErrorKind::Malformed { .. }
            | ErrorKind::LossyRewrite { .. } => None,
        }
    }
}
