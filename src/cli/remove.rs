use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::TableOptions;
use crate::common::{info, ErrorKind};
use crate::Result;

/// Remove a key and rewrite the file
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Path to ini file
    #[arg()]
    path: PathBuf,
    /// Key
    #[arg()]
    key: String,
    /// Section, root section if omitted
    #[arg(long, short)]
    section: Option<String>,
}

impl RemoveCommand {
    pub fn run<W: Write>(self, options: &TableOptions, mut out: W) -> Result<()> {
        let RemoveCommand { path, key, section } = self;

        let mut table = options.open_for_rewrite(&path)?;

        let old = match table.remove(section.as_deref(), &key) {
            Some(old) => old,
            None => return Err(ErrorKind::NotFound { section, key }.into()),
        };
        table.dump_file(&path)?;

        info!(path = %path.display(), ?section, %key, %old, "Remove");
        writeln!(out, "OK")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::root::tests::run;
    use std::fs;

    #[test]
    fn remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "; comment\n[a]\nx=1\ny=2\n").unwrap();
        let path = path.to_str().unwrap();

        let (result, out) = run(&["remove", path, "x", "--section", "a"]);
        result.unwrap();
        assert_eq!(out, "OK\n");
        assert_eq!(fs::read_to_string(path).unwrap(), "[a]\ny = 2\n");

        let (result, _) = run(&["remove", path, "x", "--section", "a"]);
        assert!(result.unwrap_err().is_not_found());
        // Untouched when nothing was removed.
        assert_eq!(fs::read_to_string(path).unwrap(), "[a]\ny = 2\n");
    }

    #[test]
    fn remove_refuses_lossy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.ini");
        let contents = (0..130).map(|i| format!("key{}=v{}\n", i, i)).collect::<String>();
        fs::write(&path, &contents).unwrap();
        let path = path.to_str().unwrap();

        let (result, _) = run(&["remove", path, "key0"]);
        assert!(matches!(
            result.unwrap_err().kind(),
            crate::ErrorKind::LossyRewrite { lost: 2 }
        ));
        assert_eq!(fs::read_to_string(path).unwrap(), contents);

        // Raising the limit makes the rewrite safe.
        let (result, _) = run(&["remove", path, "key0", "--max-entries", "256"]);
        result.unwrap();
        let rewritten = fs::read_to_string(path).unwrap();
        assert_eq!(rewritten.lines().count(), 129);
        assert!(rewritten.contains("key129 = v129"));
    }

    #[test]
    fn remove_refuses_long_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.ini");
        let contents = format!("[s]\ntoken={}\nk=1\n", "x".repeat(400));
        fs::write(&path, &contents).unwrap();
        let path = path.to_str().unwrap();

        let (result, _) = run(&["remove", path, "k", "-s", "s"]);
        assert!(matches!(
            result.unwrap_err().kind(),
            crate::ErrorKind::LossyRewrite { lost: 1 }
        ));
        assert_eq!(fs::read_to_string(path).unwrap(), contents);
    }
}
