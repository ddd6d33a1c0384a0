use serde::Deserialize;

// Bounds applied to a table.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(from = "RawLimits")]
pub struct Limits {
    // Max entries a table holds.
    max_entries: Option<usize>,
    // Max characters in a section name, key, value or input line.
    max_field_len: Option<usize>,
}

// Limits as written in a config file, before clamping.
#[derive(Deserialize, Default)]
struct RawLimits {
    max_entries: Option<usize>,
    max_field_len: Option<usize>,
}

impl From<RawLimits> for Limits {
    fn from(raw: RawLimits) -> Self {
        let mut limits = Limits::default();
        limits.set_max_entries(raw.max_entries);
        limits.set_max_field_len(raw.max_field_len);
        limits
    }
}

impl Limits {
    pub const DEFAULT_MAX_ENTRIES: usize = 128;
    pub const DEFAULT_MAX_FIELD_LEN: usize = 255;

    pub fn new(max_entries: usize, max_field_len: usize) -> Self {
        let mut limits = Limits::default();
        limits.set_max_entries(Some(max_entries));
        limits.set_max_field_len(Some(max_field_len));
        limits
    }

    pub fn set_max_entries(&mut self, val: Option<usize>) {
        if let Some(val) = val {
            self.max_entries = Some(std::cmp::max(val, 1));
        }
    }
    pub fn set_max_field_len(&mut self, val: Option<usize>) {
        if let Some(val) = val {
            self.max_field_len = Some(std::cmp::max(val, 1));
        }
    }
    pub fn override_merge(&mut self, other: &mut Limits) {
        self.set_max_entries(other.max_entries.take());
        self.set_max_field_len(other.max_field_len.take());
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.unwrap_or(Limits::DEFAULT_MAX_ENTRIES)
    }

    pub fn max_field_len(&self) -> usize {
        self.max_field_len.unwrap_or(Limits::DEFAULT_MAX_FIELD_LEN)
    }

    // Cut s down to max_field_len characters.
    pub(crate) fn truncate<'a>(&self, s: &'a str) -> &'a str {
        match s.char_indices().nth(self.max_field_len()) {
            Some((idx, _)) => &s[..idx],
            None => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let limits = Limits::default();
        assert_eq!(limits.max_entries(), 128);
        assert_eq!(limits.max_field_len(), 255);
    }

    #[test]
    fn setters_clamp_to_one() {
        let limits = Limits::new(0, 0);
        assert_eq!(limits.max_entries(), 1);
        assert_eq!(limits.max_field_len(), 1);
    }

    #[test]
    fn deserialize_clamps_to_one() {
        let limits: Limits =
            serde_yaml::from_str("max_entries: 0\nmax_field_len: 0\n").unwrap();
        assert_eq!(limits.max_entries(), 1);
        assert_eq!(limits.max_field_len(), 1);

        let limits: Limits = serde_yaml::from_str("max_entries: 5\n").unwrap();
        assert_eq!(limits.max_entries(), 5);
        assert_eq!(limits.max_field_len(), Limits::DEFAULT_MAX_FIELD_LEN);
    }

    #[test]
    fn truncate_chars() {
        let limits = Limits::new(1, 3);
        assert_eq!(limits.truncate("abcdef"), "abc");
        assert_eq!(limits.truncate("ab"), "ab");
        assert_eq!(limits.truncate("abc"), "abc");
        // Never split a multi byte character.
        assert_eq!(limits.truncate("日本語です"), "日本語");
    }
}
