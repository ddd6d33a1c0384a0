mod root;
pub use root::{parse, Command, TableOptions, TiniCommand};

mod check;
mod dump;
mod get;
mod remove;
mod set;
