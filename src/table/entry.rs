use std::fmt;
use std::mem;

use serde::{Serialize, Serializer};

// Section an entry belongs to.
// Entries which appear before any `[section]` header belong to Root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    Root,
    Named(String),
}

impl Section {
    /// Name of the section, `None` for the root section.
    pub fn name(&self) -> Option<&str> {
        match self {
            Section::Root => None,
            Section::Named(name) => Some(name.as_str()),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Section::Root)
    }

    pub(super) fn matches(&self, name: Option<&str>) -> bool {
        self.name() == name
    }
}

impl From<Option<&str>> for Section {
    fn from(name: Option<&str>) -> Self {
        match name {
            Some(name) => Section::Named(name.to_owned()),
            None => Section::Root,
        }
    }
}

impl From<&str> for Section {
    fn from(name: &str) -> Self {
        Section::Named(name.to_owned())
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

/// One (section, key, value) triple held by a [`Table`](crate::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    section: Section,
    key: String,
    value: String,
}

impl Entry {
    // Fields are expected to be truncated by the caller.
    pub(super) fn new(section: Section, key: String, value: String) -> Self {
        Self {
            section,
            key,
            value,
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(super) fn matches(&self, section: Option<&str>, key: &str) -> bool {
        self.section.matches(section) && self.key == key
    }

    // Return previous value.
    pub(super) fn replace_value(&mut self, value: String) -> String {
        mem::replace(&mut self.value, value)
    }

    pub(super) fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_never_matches_named() {
        let root = Section::from(None);
        assert!(root.is_root());
        assert!(root.matches(None));
        assert!(!root.matches(Some("")));

        // Magic names from other implementations are ordinary sections here.
        let named = Section::from("@$ROOT$@");
        assert!(!named.is_root());
        assert!(!named.matches(None));
        assert!(named.matches(Some("@$ROOT$@")));
    }

    #[test]
    fn matches_case_sensitive() {
        let entry = Entry::new("Server".into(), "Port".into(), "80".into());

        assert!(entry.matches(Some("Server"), "Port"));
        assert!(!entry.matches(Some("server"), "Port"));
        assert!(!entry.matches(Some("Server"), "port"));
        assert!(!entry.matches(None, "Port"));
    }

    #[test]
    fn replace_value() {
        let mut entry = Entry::new(Section::Root, "k".into(), "old".into());
        assert_eq!(entry.replace_value("new".into()), "old");
        assert_eq!(entry.value(), "new");
        assert_eq!(entry.to_string(), "k = new");
        assert_eq!(entry.into_value(), "new");
    }

    #[test]
    fn serialize() {
        let root = Entry::new(Section::Root, "k".into(), "v".into());
        let named = Entry::new("s".into(), "k".into(), "v".into());

        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"section":null,"key":"k","value":"v"}"#
        );
        assert_eq!(
            serde_json::to_string(&named).unwrap(),
            r#"{"section":"s","key":"k","value":"v"}"#
        );
    }
}
