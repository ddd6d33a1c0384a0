use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::common::{debug, Result};
use crate::table::Limits;

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Load config file {}", path.display());

        let f = fs::File::open(path)?;
        Config::from_reader(f)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config = serde_yaml::from_reader::<_, Config>(reader)?;
        Ok(config)
    }

    // Apply the values set in other, keeping ours where other is unset.
    pub fn override_merge(&mut self, other: &mut Config) {
        self.limits.override_merge(&mut other.limits);
    }
}
