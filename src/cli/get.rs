use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::TableOptions;
use crate::common::ErrorKind;
use crate::Result;

/// Print the value of a key
#[derive(Args, Debug)]
pub struct GetCommand {
    /// Path to ini file
    #[arg()]
    path: PathBuf,
    /// Key
    #[arg()]
    key: String,
    /// Section, root section if omitted
    #[arg(long, short)]
    section: Option<String>,
}

impl GetCommand {
    pub fn run<W: Write>(self, options: &TableOptions, mut out: W) -> Result<()> {
        let GetCommand { path, key, section } = self;

        let (table, _) = options.open(&path)?;

        match table.get(section.as_deref(), &key) {
            Some(value) => {
                writeln!(out, "{}", value)?;
                Ok(())
            }
            None => Err(ErrorKind::NotFound { section, key }.into()),
        }
    }
}
