use std::fmt;
use std::io::Write;

use crate::common::{debug, Result};
use crate::table::entry::Entry;
use crate::table::table::Table;

impl Table {
    /// Write the table in INI format.
    ///
    /// Consecutive entries of the same section form a group. Groups are
    /// separated by a blank line and start with a `[section]` header unless
    /// they belong to the root section. A section which appears again after
    /// another one is emitted as a new group with its header repeated.
    pub fn dump<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()?;

        debug!(entries = self.len(), "Dump done");

        Ok(())
    }

    // Runs of consecutive entries sharing a section, in stored order.
    fn groups(&self) -> impl Iterator<Item = &[Entry]> + '_ {
        self.entries()
            .chunk_by(|a, b| a.section() == b.section())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, group) in self.groups().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if let Some(name) = group.first().and_then(|e| e.section().name()) {
                writeln!(f, "[{}]", name)?;
            }
            for entry in group {
                writeln!(f, "{}", entry)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn dump_single_section() {
        let mut table = Table::new();
        table.set("section1", "key1", "value1").unwrap();
        table.set("section1", "key2", "value2").unwrap();

        let mut buf = Vec::new();
        table.dump(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "[section1]\nkey1 = value1\nkey2 = value2\n");
        assert_eq!(text.matches("[section1]").count(), 1);
    }

    #[test]
    fn dump_root_first() {
        let input = "name=tini\n[a]\nx=1\n[b]\ny=2\n";
        let table = Table::from_reader(input.as_bytes()).unwrap();

        assert_eq!(
            table.to_string(),
            "name = tini\n\n[a]\nx = 1\n\n[b]\ny = 2\n"
        );
    }

    #[test]
    fn dump_repeats_non_contiguous_section() {
        let mut table = Table::new();
        table.set("a", "k1", "1").unwrap();
        table.set("b", "k2", "2").unwrap();
        table.set("a", "k3", "3").unwrap();

        assert_eq!(
            table.to_string(),
            "[a]\nk1 = 1\n\n[b]\nk2 = 2\n\n[a]\nk3 = 3\n"
        );
    }

    #[test]
    fn dump_root_after_named() {
        let mut table = Table::new();
        table.set("a", "k1", "1").unwrap();
        table.set(None, "k2", "2").unwrap();

        // Root group gets a separator but no header.
        assert_eq!(table.to_string(), "[a]\nk1 = 1\n\nk2 = 2\n");
    }

    #[test]
    fn dump_empty_section_name() {
        let table = Table::from_reader("[]\nk=v\n".as_bytes()).unwrap();
        assert_eq!(table.to_string(), "[]\nk = v\n");
    }

    #[test]
    fn dump_empty() {
        let mut buf = Vec::new();
        Table::new().dump(&mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn dump_normalizes_spacing() {
        let table = Table::from_reader("  k   =v\n".as_bytes()).unwrap();
        assert_eq!(table.to_string(), "k = v\n");
    }

    #[test]
    fn dump_then_load() {
        let mut table = Table::new();
        table.set(None, "name", "tini").unwrap();
        table.set("server", "host", "127.0.0.1").unwrap();
        table.set("server", "url", "http://a/?b=c").unwrap();
        table.set("client", "retry", "").unwrap();

        let mut buf = Vec::new();
        table.dump(&mut buf).unwrap();
        let loaded = Table::from_reader(buf.as_slice()).unwrap();

        assert_eq!(loaded, table);
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dump_write_error() {
        let mut table = Table::new();
        table.set("s", "k", "v").unwrap();

        let err = table.dump(Closed).unwrap_err();
        assert!(matches!(err.kind(), crate::ErrorKind::Io(_)));
    }
}
