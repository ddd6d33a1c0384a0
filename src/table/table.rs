use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::slice;

use tempfile::NamedTempFile;

use crate::common::{debug, trace, ErrorKind, Result};
use crate::config::Config;
use crate::table::entry::{Entry, Section};
use crate::table::limits::Limits;
use crate::table::load::LoadReport;

/// Ordered, bounded collection of (section, key, value) entries.
///
/// Sections are addressed with `Option<&str>`, `None` being the root section
/// which holds entries that appear before any `[section]` header.
/// A plain `&str` is accepted wherever a section is expected.
///
/// Lookups scan in insertion order and the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<Entry>,
    limits: Limits,
}

impl Table {
    // Upper bound of up front allocation.
    const PREALLOC_ENTRIES: usize = 128;

    pub fn new() -> Self {
        Table::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            entries: Vec::with_capacity(limits.max_entries().min(Table::PREALLOC_ENTRIES)),
            limits,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Table::with_limits(config.limits)
    }

    /// Construct a table from the entries read from file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut table = Table::new();
        table.load_file(path)?;
        Ok(table)
    }

    /// Load entries from the file into this table.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        debug!("Load {}", path.display());

        let f = fs::File::open(path)?;
        self.load(BufReader::new(f))
    }

    /// Write the table to the file, replacing it.
    ///
    /// The entries are written to a temporary file in the same directory which
    /// is then renamed over path, so a failed write leaves the file untouched.
    pub fn dump_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Dump {}", path.display());

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        self.dump(BufWriter::new(tmp.as_file_mut()))?;
        tmp.persist(path).map_err(|err| err.error)?;

        Ok(())
    }

    /// Remove all entries. Limits are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limits.max_entries()
    }

    /// Max number of entries this table holds.
    pub fn capacity(&self) -> usize {
        self.limits.max_entries()
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Entries in stored order.
    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get<'s>(&self, section: impl Into<Option<&'s str>>, key: &str) -> Option<&str> {
        self.position(section.into(), key)
            .map(|i| self.entries[i].value())
    }

    pub fn has<'s>(&self, section: impl Into<Option<&'s str>>, key: &str) -> bool {
        self.position(section.into(), key).is_some()
    }

    /// Update the value in place if the entry exists, otherwise append a new entry.
    /// Return the previous value.
    pub fn set<'s>(
        &mut self,
        section: impl Into<Option<&'s str>>,
        key: &str,
        value: &str,
    ) -> Result<Option<String>> {
        let section = section.into().map(|s| self.limits.truncate(s));
        let key = self.limits.truncate(key);
        let value = self.limits.truncate(value).to_owned();

        if let Some(i) = self.position(section, key) {
            trace!(?section, key, "Update entry");
            return Ok(Some(self.entries[i].replace_value(value)));
        }

        if self.is_full() {
            return Err(ErrorKind::CapacityExceeded {
                max_entries: self.limits.max_entries(),
            }
            .into());
        }

        trace!(?section, key, "Append entry");
        self.entries
            .push(Entry::new(Section::from(section), key.to_owned(), value));

        Ok(None)
    }

    /// Remove the first matching entry and return its value.
    pub fn remove<'s>(&mut self, section: impl Into<Option<&'s str>>, key: &str) -> Option<String> {
        let section = section.into();
        let i = self.position(section, key)?;

        trace!(?section, key, "Remove entry");
        Some(self.entries.remove(i).into_value())
    }

    // Append without duplicate check. return false if the table is full.
    pub(super) fn push(&mut self, entry: Entry) -> bool {
        if self.is_full() {
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    pub(super) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    // Stored fields are truncated, so compare with the truncated form.
    fn position(&self, section: Option<&str>, key: &str) -> Option<usize> {
        let section = section.map(|s| self.limits.truncate(s));
        let key = self.limits.truncate(key);

        self.entries.iter().position(|e| e.matches(section, key))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
