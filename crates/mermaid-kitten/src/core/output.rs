//! Writing the rendered diagram
//!
//! File output goes through a temporary file in the destination directory
//! that is synced and then renamed over the target, so readers see either the
//! old content or the new content in full.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;
use tracing::{debug, info};

use super::error::KittenError;

/// Path reported in errors for standard output
const STDOUT: &str = "<stdout>";

/// Write `content` to `destination`, or to stdout when it is `None`
pub fn write_diagram(content: &str, destination: Option<&Path>) -> Result<(), KittenError> {
    match destination {
        Some(path) => write_atomically(path, content),
        None => write_stream(io::stdout().lock(), content),
    }
}

/// Write `content` to a stream, ending it with a newline
///
/// A reader that closed the stream early (`| head`) is not an error.
pub fn write_stream(mut out: impl Write, content: &str) -> Result<(), KittenError> {
    let result = out
        .write_all(content.as_bytes())
        .and_then(|_| {
            if content.ends_with('\n') {
                Ok(())
            } else {
                out.write_all(b"\n")
            }
        })
        .and_then(|_| out.flush());

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Output stream closed early");
            Ok(())
        }
        Err(e) => Err(KittenError::output(STDOUT, e)),
    }
}

/// Replace the file at `path` with `content` in one rename
///
/// An existing file keeps its permissions; a new file gets the mode a plain
/// create would give it under the current umask.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), KittenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut file = builder
        .tempfile_in(parent)
        .map_err(|e| KittenError::output(path, e))?;

    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| KittenError::output(path, e))?;
    }

    file.write_all(content.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| KittenError::output(path, e))?;
    debug!(temp = %file.path().display(), bytes = content.len(), "Wrote temporary diagram");

    file.persist(path)
        .map_err(|e| KittenError::output(path, e.error))?;

    info!(path = %path.display(), "Diagram written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.md");
        write_diagram("classDiagram", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "classDiagram");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.md");
        fs::write(&path, "old content that is longer than the new one").unwrap();
        write_atomically(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.md");
        write_atomically(&path, "content").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_parent_is_output_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/diagram.md");
        let result = write_atomically(&path, "content");
        assert!(matches!(result, Err(KittenError::Output { .. })));
    }

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(self.0))
        }
    }

    #[test]
    fn test_stream_gets_trailing_newline() {
        let mut out = Vec::new();
        write_stream(&mut out, "classDiagram").unwrap();
        assert_eq!(out, b"classDiagram\n");

        let mut out = Vec::new();
        write_stream(&mut out, "classDiagram\n").unwrap();
        assert_eq!(out, b"classDiagram\n");
    }

    #[test]
    fn test_closed_stream_is_not_an_error() {
        assert!(write_stream(FailingWriter(io::ErrorKind::BrokenPipe), "classDiagram").is_ok());
    }

    #[test]
    fn test_stream_failure_is_output_error() {
        let err = write_stream(FailingWriter(io::ErrorKind::Other), "classDiagram").unwrap_err();
        assert!(matches!(err, KittenError::Output { .. }));
        assert!(err.to_string().contains("<stdout>"));
    }

    #[cfg(unix)]
    #[test]
    fn test_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.md");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomically(&path, "new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let reference = dir.path().join("reference.md");
        fs::write(&reference, "").unwrap();
        let path = dir.path().join("diagram.md");

        write_atomically(&path, "new").unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }
}
