use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::cli::TableOptions;
use crate::common::debug;
use crate::table::Entry;
use crate::Result;

/// Dump table
#[derive(Args, Debug)]
pub struct DumpCommand {
    /// Path to ini file
    #[arg()]
    path: PathBuf,

    /// Dump as json
    #[arg(long)]
    json: bool,
}

impl DumpCommand {
    pub fn run<W: Write>(self, options: &TableOptions, mut out: W) -> Result<()> {
        let DumpCommand { path, json } = self;

        debug!("Dump {}", path.display());

        let (table, _) = options.open(&path)?;

        if json {
            let entries = table.iter().collect::<Vec<&Entry>>();
            serde_json::to_writer_pretty(&mut out, &json!({ "entries": entries }))?;
            writeln!(out)?;
        } else {
            table.dump(&mut out)?;
        }

        Ok(())
    }
}
