use crate::error::EnumerationError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file found below the upload root.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileEntry {
    path: PathBuf,
    relative: PathBuf,
    ///parent directories below the root, `/`-joined with a trailing `/`, or empty
    relative_dir: String,
    file_name: String,
}

impl FileEntry {
    pub fn new(root: &Path, path: PathBuf) -> Result<Self, EnumerationError> {
        let Ok(relative) = path.strip_prefix(root).map(Path::to_path_buf) else {
            return Err(EnumerationError::OutsideRoot {
                root: root.to_path_buf(),
                path,
            });
        };

        let Some(file_name) = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
        else {
            return Err(EnumerationError::NonUtf8 { path });
        };

        let mut relative_dir = String::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                let Some(component) = component.as_os_str().to_str() else {
                    return Err(EnumerationError::NonUtf8 { path });
                };
                relative_dir.push_str(component);
                relative_dir.push('/');
            }
        }

        Ok(Self {
            path,
            relative,
            relative_dir,
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    ///empty when the root itself is this file
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn relative_dir(&self) -> &str {
        &self.relative_dir
    }

    /// `prefix + relative_dir + file_name`. The prefix is used verbatim.
    pub fn destination_key(&self, prefix: &str) -> String {
        let mut key =
            String::with_capacity(prefix.len() + self.relative_dir.len() + self.file_name.len());
        key.push_str(prefix);
        key.push_str(&self.relative_dir);
        key.push_str(&self.file_name);
        key
    }
}

/// Lists every regular file reachable from `root`, depth first.
///
/// Subdirectories are expanded in place, so their files come before the
/// directory's later siblings. Siblings appear in whatever order the
/// filesystem lists them, which differs between platforms. Symlinks are
/// followed. The first unreadable entry fails the whole listing.
pub fn enumerate(root: &Path) -> Result<Vec<FileEntry>, EnumerationError> {
    let mut entries = vec![];

    for item in WalkDir::new(root).follow_links(true) {
        let item = item.map_err(|source| EnumerationError::Walk {
            root: root.to_path_buf(),
            path: source.path().map(Path::to_path_buf),
            source,
        })?;

        if !item.file_type().is_file() {
            continue;
        }

        trace!(pb = ?item.path(), "Found file");
        entries.push(FileEntry::new(root, item.into_path())?);
    }

    debug!(?root, count = entries.len(), "Enumerated files");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, fs};
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), b"b").unwrap();
        fs::write(dir.path().join("sub/deeper/c.txt"), b"c").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("z.txt"), b"z").unwrap();
        dir
    }

    fn relatives(entries: &[FileEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.relative().to_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn lists_exactly_the_regular_files() {
        let dir = tree();
        let entries = enumerate(dir.path()).unwrap();

        let found: HashSet<_> = relatives(&entries).into_iter().collect();
        let expected: HashSet<_> = ["a.txt", "sub/b.txt", "sub/deeper/c.txt", "z.txt"]
            .into_iter()
            .map(str::to_owned)
            .collect();

        assert_eq!(entries.len(), 4, "no duplicates");
        assert_eq!(found, expected);
        assert!(entries.iter().all(|e| e.path().is_file()));
        assert!(entries.iter().all(|e| e.path().starts_with(dir.path())));
    }

    #[test]
    fn subdirectory_files_are_contiguous() {
        let dir = tree();
        let relatives = relatives(&enumerate(dir.path()).unwrap());

        let positions: Vec<_> = relatives
            .iter()
            .enumerate()
            .filter(|(_, r)| r.starts_with("sub/"))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], positions[0] + 1);
    }

    #[test]
    fn relative_dir_has_trailing_slash_below_root_only() {
        let dir = tree();
        let entries = enumerate(dir.path()).unwrap();

        for entry in &entries {
            let expected = match entry.file_name() {
                "a.txt" | "z.txt" => "",
                "b.txt" => "sub/",
                "c.txt" => "sub/deeper/",
                other => panic!("unexpected file {other}"),
            };
            assert_eq!(entry.relative_dir(), expected);
        }
    }

    #[test]
    fn single_file_root_is_one_entry_with_empty_relative_path() {
        let dir = tree();
        let root = dir.path().join("a.txt");

        let entries = enumerate(&root).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), root);
        assert_eq!(entries[0].relative(), Path::new(""));
        assert_eq!(entries[0].relative_dir(), "");
        assert_eq!(entries[0].destination_key("deploy/"), "deploy/a.txt");
    }

    #[test]
    fn empty_directory_has_no_entries() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = enumerate(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EnumerationError::Walk { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn broken_entry_below_the_root_fails_the_whole_listing() {
        let dir = tree();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("sub/dangling"))
            .unwrap();

        let err = enumerate(dir.path()).unwrap_err();

        match err {
            EnumerationError::Walk { path, .. } => {
                assert_eq!(path, Some(dir.path().join("sub/dangling")));
            }
            other => panic!("expected a walk error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_regular_files() {
        let dir = tree();
        let _listener =
            std::os::unix::net::UnixListener::bind(dir.path().join("sub/control.sock")).unwrap();

        let entries = enumerate(dir.path()).unwrap();

        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.file_name() != "control.sock"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_fail() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.txt")), b"x").unwrap();

        let err = enumerate(dir.path()).unwrap_err();
        assert!(matches!(err, EnumerationError::NonUtf8 { .. }));
    }

    #[test]
    fn destination_keys_follow_the_relative_layout() {
        let root = Path::new("/data");
        let a = FileEntry::new(root, PathBuf::from("/data/a.txt")).unwrap();
        let b = FileEntry::new(root, PathBuf::from("/data/sub/b.txt")).unwrap();

        assert_eq!(a.destination_key("deploy/"), "deploy/a.txt");
        assert_eq!(b.destination_key("deploy/"), "deploy/sub/b.txt");
        assert_eq!(b.destination_key(""), "sub/b.txt");
        assert_eq!(b.destination_key("deploy"), "deploysub/b.txt");
    }

    #[test]
    fn entries_outside_the_root_are_rejected() {
        let err = FileEntry::new(Path::new("/data"), PathBuf::from("/other/a.txt")).unwrap_err();
        assert!(matches!(err, EnumerationError::OutsideRoot { .. }));
    }
}
