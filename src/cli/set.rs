use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::TableOptions;
use crate::common::info;
use crate::Result;

/// Set the value of a key and rewrite the file
#[derive(Args, Debug)]
pub struct SetCommand {
    /// Path to ini file, created if missing
    #[arg()]
    path: PathBuf,
    /// Key
    #[arg()]
    key: String,
    /// Value
    #[arg()]
    value: String,
    /// Section, root section if omitted
    #[arg(long, short)]
    section: Option<String>,
}

impl SetCommand {
    pub fn run<W: Write>(self, options: &TableOptions, mut out: W) -> Result<()> {
        let SetCommand {
            path,
            key,
            value,
            section,
        } = self;

        let mut table = options.open_for_rewrite(&path)?;

        let old = table.set(section.as_deref(), &key, &value)?;
        table.dump_file(&path)?;

        info!(path = %path.display(), ?section, %key, ?old, "Set");
        writeln!(out, "OK")?;

        Ok(())
    }
}
