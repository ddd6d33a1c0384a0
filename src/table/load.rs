use std::fmt;
use std::io::{self, BufRead, Read};

use crate::common::{debug, Result};
use crate::table::entry::{Entry, Section};
use crate::table::table::Table;

/// Summary of a load.
/// Malformed lines never fail a load, they are reported here instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of entries appended to the table.
    pub loaded: usize,
    /// Lines which were ignored or only partially used.
    pub skipped: Vec<Skipped>,
}

impl LoadReport {
    /// Return true if every line was used as is.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Skipped lines whose entries are missing from or cut short in the table.
    pub fn lossy(&self) -> impl Iterator<Item = &Skipped> + '_ {
        self.skipped.iter().filter(|s| s.reason.is_lossy())
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        debug!(line, %reason, "Skip line");
        self.skipped.push(Skipped { line, reason });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipped {
    /// 1-based line number.
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    // `[` without a closing `]`.
    UnterminatedSection,
    // Neither a comment, a header nor `key=value`.
    MissingSeparator,
    // Entry dropped because the table is full.
    CapacityExceeded,
    // Line cut down to the max field length. The head of the line is still used.
    LineTruncated,
}

impl SkipReason {
    /// Return true if an otherwise valid entry was dropped or shortened.
    pub fn is_lossy(&self) -> bool {
        matches!(self, SkipReason::CapacityExceeded | SkipReason::LineTruncated)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::UnterminatedSection => "unterminated section header".fmt(f),
            SkipReason::MissingSeparator => "missing '=' separator".fmt(f),
            SkipReason::CapacityExceeded => "table capacity exceeded".fmt(f),
            SkipReason::LineTruncated => "line too long, truncated".fmt(f),
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

// Classification of a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Section(&'a str),
    UnterminatedSection,
    KeyValue(&'a str, &'a str),
    MissingSeparator,
}

impl<'a> Line<'a> {
    fn parse(raw: &'a str) -> Self {
        let line = trim(raw);

        match line.chars().next() {
            None => Line::Blank,
            Some('#' | ';') => Line::Comment,
            // Name is taken verbatim up to the first `]`, rest of the line is ignored.
            Some('[') => match line[1..].split_once(']') {
                Some((name, _)) => Line::Section(name),
                None => Line::UnterminatedSection,
            },
            Some(_) => match line.split_once('=') {
                Some((key, value)) => Line::KeyValue(trim(key), trim(value)),
                None => Line::MissingSeparator,
            },
        }
    }
}

// Trim ASCII whitespace, including vertical tab which char::is_ascii_whitespace excludes.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B')
}

// Discard the rest of the current line, including its newline.
// Return true if anything besides the line ending was discarded.
fn skip_to_next_line<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let mut discarded = false;
    loop {
        let (found, used) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                return Ok(discarded);
            }
            let (found, used) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (false, available.len()),
            };
            discarded |= available[..used].iter().any(|&b| b != b'\r' && b != b'\n');
            (found, used)
        };
        reader.consume(used);
        if found {
            return Ok(discarded);
        }
    }
}

impl Table {
    /// Construct a table from the entries read from reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Table::new();
        table.load(reader)?;
        Ok(table)
    }

    /// Append the entries read from reader.
    ///
    /// Parsing is permissive: comment lines and blank lines are ignored,
    /// malformed lines and entries beyond the table capacity are dropped and
    /// recorded in the returned report. Only I/O errors fail the load, in
    /// which case the entries read so far are kept.
    pub fn load<R: BufRead>(&mut self, mut reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut section = Section::Root;
        // Enough bytes for max_field_len characters of up to 4 bytes and "\r\n".
        let max_line_bytes = self.limits().max_field_len().saturating_mul(4).saturating_add(2);
        let mut buf = Vec::with_capacity(self.limits().max_field_len() + 2);
        let mut line_number = 0;

        loop {
            buf.clear();
            let n = (&mut reader)
                .take(max_line_bytes as u64)
                .read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            line_number += 1;

            let mut truncated = false;
            if n == max_line_bytes && buf.last() != Some(&b'\n') {
                truncated = skip_to_next_line(&mut reader)?;
            }

            let decoded = String::from_utf8_lossy(&buf);
            let raw = decoded.trim_end_matches(['\n', '\r']);
            let line = self.limits().truncate(raw);
            if truncated || line.len() < raw.len() {
                report.skip(line_number, SkipReason::LineTruncated);
            }

            match Line::parse(line) {
                Line::Blank | Line::Comment => {}
                Line::Section(name) => {
                    section = Section::Named(self.limits().truncate(name).to_owned());
                }
                Line::UnterminatedSection => {
                    report.skip(line_number, SkipReason::UnterminatedSection)
                }
                Line::MissingSeparator => report.skip(line_number, SkipReason::MissingSeparator),
                Line::KeyValue(key, value) => {
                    let entry = Entry::new(section.clone(), key.to_owned(), value.to_owned());
                    if self.push(entry) {
                        report.loaded += 1;
                    } else {
                        report.skip(line_number, SkipReason::CapacityExceeded);
                    }
                }
            }
        }

        debug!(
            lines = line_number,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Load done"
        );

        Ok(report)
    }
}
