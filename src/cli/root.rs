use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::cli::{check, dump, get, remove, set};
use crate::common::{warn, ErrorKind};
use crate::config::{self, Config};
use crate::table::{LoadReport, Table};
use crate::Result;

/// Tini command
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct TiniCommand {
    /// Table options
    #[command(flatten)]
    pub options: TableOptions,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Table options
#[derive(Args, Debug, Default)]
pub struct TableOptions {
    /// Path to yaml config file
    #[arg(long, env = config::env::CONFIG_PATH, global = true)]
    pub config: Option<PathBuf>,
    /// Max entries, overrides the config file
    #[arg(long, global = true)]
    pub max_entries: Option<usize>,
    /// Max characters per line and field, overrides the config file
    #[arg(long, global = true)]
    pub max_field_len: Option<usize>,
}

impl TableOptions {
    fn new_table(&self) -> Result<Table> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };

        let mut flags = Config::default();
        flags.limits.set_max_entries(self.max_entries);
        flags.limits.set_max_field_len(self.max_field_len);
        config.override_merge(&mut flags);

        Ok(Table::from_config(&config))
    }

    pub(super) fn open(&self, path: &Path) -> Result<(Table, LoadReport)> {
        let mut table = self.new_table()?;
        let report = table.load_file(path)?;
        Ok((table, report))
    }

    // Open a file which is going to be rewritten.
    // Start from an empty table when the file does not exist yet and refuse
    // files whose entries would not survive the rewrite.
    pub(super) fn open_for_rewrite(&self, path: &Path) -> Result<Table> {
        if !path.exists() {
            return self.new_table();
        }

        let (table, report) = self.open(path)?;
        let lost = report.lossy().count();
        if lost > 0 {
            for skipped in report.lossy() {
                warn!(path = %path.display(), %skipped, "Entry would be lost");
            }
            return Err(ErrorKind::LossyRewrite { lost }.into());
        }

        Ok(table)
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get
    Get(get::GetCommand),
    /// Set
    Set(set::SetCommand),
    /// Remove
    Remove(remove::RemoveCommand),
    /// Dump
    Dump(dump::DumpCommand),
    /// Check
    Check(check::CheckCommand),
}

impl Command {
    /// Run the command, writing its output to out.
    pub fn run<W: Write>(self, options: &TableOptions, out: W) -> Result<()> {
        match self {
            Command::Get(get) => get.run(options, out),
            Command::Set(set) => set.run(options, out),
            Command::Remove(remove) => remove.run(options, out),
            Command::Dump(dump) => dump.run(options, out),
            Command::Check(check) => check.run(options, out),
        }
    }
}

/// Parse command line args
pub fn parse() -> TiniCommand {
    TiniCommand::parse()
}
