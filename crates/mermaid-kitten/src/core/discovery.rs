//! Source file discovery
//!
//! Recursively collects files with a recognized extension below a root
//! directory. Hidden directories such as `.build` or `.git` are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, span, trace, warn, Level};

use super::error::KittenError;

/// Find every file below `root` whose extension is in `extensions`
///
/// The result is sorted so runs over the same tree are reproducible. A
/// missing or unreadable root is an error; unreadable subdirectories are
/// logged and skipped.
pub fn discover(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, KittenError> {
    let discover_span = span!(Level::INFO, "discover", root = %root.display());
    let _enter = discover_span.enter();

    let entries = fs::read_dir(root).map_err(|e| KittenError::discovery(root, e))?;

    let mut files = Vec::new();
    let mut pending = vec![entries];

    while let Some(entries) = pending.pop() {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if is_hidden(&path) {
                    trace!(path = %path.display(), "Skipping hidden directory");
                    continue;
                }
                match fs::read_dir(&path) {
                    Ok(children) => pending.push(children),
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable directory"),
                }
            } else if has_extension(&path, extensions) {
                trace!(path = %path.display(), "Discovered source file");
                files.push(path);
            }
        }
    }

    files.sort();
    debug!(file_count = files.len(), "Discovery completed");
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discovers_nested_files_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Models/Animals")).unwrap();
        fs::write(root.join("Models/Animals/Cat.swift"), "").unwrap();
        fs::write(root.join("Models/Shape.swift"), "").unwrap();
        fs::write(root.join("App.swift"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let files = discover(root, &["swift"]).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("App.swift"),
                root.join("Models/Animals/Cat.swift"),
                root.join("Models/Shape.swift"),
            ]
        );
    }

    #[test]
    fn test_skips_hidden_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".build/checkouts")).unwrap();
        fs::write(root.join(".build/checkouts/Dependency.swift"), "").unwrap();
        fs::write(root.join("Main.swift"), "").unwrap();

        let files = discover(root, &["swift"]).unwrap();
        assert_eq!(files, vec![root.join("Main.swift")]);
    }

    #[test]
    fn test_multiple_extensions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.json"), "{}").unwrap();
        fs::write(root.join("b.swift"), "").unwrap();

        assert_eq!(discover(root, &["json"]).unwrap().len(), 1);
        assert_eq!(discover(root, &["json", "swift"]).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(discover(dir.path(), &["swift"]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let result = discover(&dir.path().join("missing"), &["swift"]);
        assert!(matches!(result, Err(KittenError::Discovery { .. })));
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Single.swift");
        fs::write(&file, "").unwrap();
        assert!(discover(&file, &["swift"]).is_err());
    }
}
