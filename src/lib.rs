#![allow(clippy::module_inception)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod table;

pub use crate::error::{Error, ErrorKind};
pub type Result<T, E = crate::error::Error> = std::result::Result<T, E>;

pub use table::{Entry, Limits, LoadReport, Section, SkipReason, Skipped, Table};

pub(crate) mod common {
    pub(crate) use crate::error::ErrorKind;
    pub(crate) use crate::Result;

    pub use tracing::{debug, info, trace, warn};
}
