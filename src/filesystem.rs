//! Filesystem access for the deployer.
//!
//! The deployer only ever checks, creates, deletes, reads, writes and
//! copies. Routing those through [`Filesystem`] lets the directory state
//! machine and the skip-if-absent copy policy be tested without touching
//! disk. [`StdFs`] is the real implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait Filesystem {
    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Copy a single file, overwriting `to` if it exists.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `std::fs` passthrough.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl Filesystem for StdFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }
}

/// Every file below `dir`, relative to it and sorted by name.
///
/// Unreadable entries are skipped.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    /// In-memory filesystem. Directories are tracked explicitly; writing a
    /// file requires its parent directory to exist, like the real thing.
    #[derive(Default)]
    pub struct MemoryFs {
        dirs: Mutex<BTreeSet<PathBuf>>,
        files: Mutex<BTreeMap<PathBuf, String>>,
        operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        CreateDir(PathBuf),
        RemoveDir(PathBuf),
        Write(PathBuf),
        Copy { from: PathBuf, to: PathBuf },
    }

    impl MemoryFs {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a file, creating its parent directories. Not recorded.
        pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
            let path = path.into();
            if let Some(parent) = path.parent() {
                self.insert_dirs(parent);
            }
            self.files
                .lock()
                .unwrap()
                .insert(path, contents.to_string());
        }

        /// Seed a directory (and its ancestors). Not recorded.
        pub fn add_dir(&self, path: impl Into<PathBuf>) {
            self.insert_dirs(&path.into());
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.lock().unwrap().get(path.as_ref()).cloned()
        }

        /// File names directly inside `dir`, sorted.
        pub fn list(&self, dir: impl AsRef<Path>) -> Vec<String> {
            let dir = dir.as_ref();
            self.files
                .lock()
                .unwrap()
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect()
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn insert_dirs(&self, path: &Path) {
            let mut dirs = self.dirs.lock().unwrap();
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }

        fn require_parent(&self, path: &Path) -> io::Result<()> {
            match path.parent() {
                Some(parent) if !self.is_dir(parent) => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent directory missing: {}", parent.display()),
                )),
                _ => Ok(()),
            }
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }

    impl Filesystem for MemoryFs {
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.record(RecordedOp::CreateDir(path.to_path_buf()));
            self.insert_dirs(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
            if !self.is_dir(path) {
                return Err(not_found(path));
            }
            self.record(RecordedOp::RemoveDir(path.to_path_buf()));
            self.dirs.lock().unwrap().retain(|d| !d.starts_with(path));
            self.files.lock().unwrap().retain(|f, _| !f.starts_with(path));
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.contents(path).ok_or_else(|| not_found(path))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.require_parent(path)?;
            self.record(RecordedOp::Write(path.to_path_buf()));
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
            let contents = self.read_to_string(from)?;
            self.require_parent(to)?;
            self.record(RecordedOp::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
            self.files
                .lock()
                .unwrap()
                .insert(to.to_path_buf(), contents);
            Ok(())
        }
    }

    #[test]
    fn memory_fs_write_requires_parent() {
        let fs = MemoryFs::new();
        assert!(fs.write(Path::new("/out/index.html"), "x").is_err());
        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write(Path::new("/out/index.html"), "x").unwrap();
        assert_eq!(fs.contents("/out/index.html").as_deref(), Some("x"));
    }

    #[test]
    fn memory_fs_remove_dir_drops_children() {
        let fs = MemoryFs::new();
        fs.add_file("/out/a.html", "a");
        fs.add_file("/out/sub/b.html", "b");
        fs.add_file("/keep/c.html", "c");
        fs.remove_dir_all(Path::new("/out")).unwrap();
        assert!(!fs.is_dir(Path::new("/out")));
        assert!(!fs.is_file(Path::new("/out/sub/b.html")));
        assert!(fs.is_file(Path::new("/keep/c.html")));
    }

    #[test]
    fn memory_fs_copy_missing_source_fails() {
        let fs = MemoryFs::new();
        fs.add_dir("/out");
        let err = fs
            .copy(Path::new("/src/missing.jpg"), Path::new("/out/missing.jpg"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fs.get_operations().is_empty());
    }

    #[test]
    fn memory_fs_list_only_direct_children() {
        let fs = MemoryFs::new();
        fs.add_file("/out/b.html", "");
        fs.add_file("/out/a.html", "");
        fs.add_file("/out/sub/c.html", "");
        assert_eq!(fs.list("/out"), vec!["a.html", "b.html"]);
    }

    #[test]
    fn std_fs_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let fs = StdFs;
        let dir = tmp.path().join("out");
        fs.create_dir_all(&dir).unwrap();
        assert!(fs.is_dir(&dir));
        fs.write(&dir.join("a.txt"), "hello").unwrap();
        fs.copy(&dir.join("a.txt"), &dir.join("b.txt")).unwrap();
        assert_eq!(fs.read_to_string(&dir.join("b.txt")).unwrap(), "hello");
        fs.remove_dir_all(&dir).unwrap();
        assert!(!fs.is_dir(&dir));
    }

    #[test]
    fn list_files_is_recursive_and_relative() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("b.html"), "").unwrap();
        std::fs::write(tmp.path().join("a.html"), "").unwrap();
        std::fs::write(tmp.path().join("sub/c.js"), "").unwrap();
        assert_eq!(
            list_files(tmp.path()),
            vec![
                PathBuf::from("a.html"),
                PathBuf::from("b.html"),
                PathBuf::from("sub/c.js"),
            ]
        );
    }

    #[test]
    fn list_files_missing_dir_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(list_files(&tmp.path().join("nope")).is_empty());
    }
}
