mod dump;
mod entry;
mod limits;
mod load;
mod table;

pub use self::entry::{Entry, Section};
pub use self::limits::Limits;
pub use self::load::{LoadReport, SkipReason, Skipped};
pub use self::table::Table;
