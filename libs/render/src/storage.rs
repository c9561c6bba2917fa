//! Where watchface files come from
//!
//! On the device the flash filesystem is mounted by the OS under a fixed
//! directory; [`FsStorage`] resolves watchface paths inside it. Tests swap
//! in their own [`Storage`] to observe how files are opened and released.

use log::debug;
use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek};
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Handle to one open file. Dropping it closes the file.
    type File: Read + Seek;

    /// Make sure the backing filesystem is available.
    fn mount(&mut self) -> io::Result<()>;

    /// Open `path` for reading.
    fn open(&mut self, path: &str) -> io::Result<Self::File>;
}

/// Watchfaces stored below a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute paths are taken relative to the storage root.
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for FsStorage {
    type File = File;

    fn mount(&mut self) -> io::Result<()> {
        let metadata = std::fs::metadata(&self.root)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                ErrorKind::NotADirectory,
                format!("{} is not a directory", self.root.display()),
            ));
        }
        debug!("Storage mounted at {}", self.root.display());
        Ok(())
    }

    fn open(&mut self, path: &str) -> io::Result<Self::File> {
        let full_path = self.resolve(path);
        debug!("Opening {}", full_path.display());
        File::open(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mount_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FsStorage::new(dir.path());
        assert!(storage.mount().is_ok());

        let mut missing = FsStorage::new(dir.path().join("missing"));
        assert_eq!(missing.mount().unwrap_err().kind(), ErrorKind::NotFound);

        let file_path = dir.path().join("plain");
        std::fs::write(&file_path, b"x").unwrap();
        let mut not_dir = FsStorage::new(&file_path);
        assert_eq!(
            not_dir.mount().unwrap_err().kind(),
            ErrorKind::NotADirectory
        );
    }

    #[test]
    fn test_open_resolves_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("face.bmp")).unwrap();
        file.write_all(b"BM").unwrap();

        let mut storage = FsStorage::new(dir.path());
        let mut opened = storage.open("/face.bmp").unwrap();
        let mut contents = Vec::new();
        opened.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"BM");

        assert!(storage.open("face.bmp").is_ok());
        assert_eq!(
            storage.open("other.bmp").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
