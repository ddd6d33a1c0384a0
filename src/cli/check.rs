use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::TableOptions;
use crate::common::ErrorKind;
use crate::Result;

/// Report lines ignored while loading
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Path to ini file
    #[arg()]
    path: PathBuf,
}

impl CheckCommand {
    pub fn run<W: Write>(self, options: &TableOptions, mut out: W) -> Result<()> {
        let CheckCommand { path } = self;

        let (_, report) = options.open(&path)?;

        if report.is_clean() {
            writeln!(out, "OK {} entries", report.loaded)?;
            return Ok(());
        }

        for skipped in &report.skipped {
            writeln!(out, "{}:{}", path.display(), skipped)?;
        }

        Err(ErrorKind::Malformed {
            skipped: report.skipped.len(),
        }
        .into())
    }
}
