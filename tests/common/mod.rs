use std::fs;
use std::path::PathBuf;

pub fn temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

// Write contents to name under dir and return its path.
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}
