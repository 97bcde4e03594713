// asascan - platform/fs.rs
//
// Filesystem access for the input log. The core scanner only ever sees
// the returned reader.

use crate::util::error::ScanError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Open `path` for a line-by-line scan.
///
/// The handle is owned by the returned reader and closed when it drops.
/// Directories are rejected here so the failure reads as an open error
/// rather than a read error on the first line.
pub fn open_log(path: &Path) -> Result<BufReader<File>, ScanError> {
    let open_err = |source: io::Error| ScanError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let metadata = file.metadata().map_err(open_err)?;
    if metadata.is_dir() {
        return Err(open_err(io::Error::new(
            io::ErrorKind::Other,
            "is a directory",
        )));
    }

    tracing::debug!(path = %path.display(), size = metadata.len(), "Opened log file");
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Write};

    #[test]
    fn test_open_and_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first").unwrap();
        let mut reader = open_log(file.path()).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "first\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log(&dir.path().join("absent.log")).unwrap_err();
        match err {
            ScanError::Open { path, source } => {
                assert!(path.ends_with("absent.log"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Open error, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::Open { .. }));
    }
}
