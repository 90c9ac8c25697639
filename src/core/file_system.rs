use super::config::CollectorConfig;
use super::models::FileEntry;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/*
 * This module walks the project tree and selects the files to be collected.
 * It defines the trait `FileSystemScannerOperations` for abstracting the scan
 * and a concrete implementation `CoreFileSystemScanner` built on `walkdir`.
 * Ignored directories are pruned during the walk, so nothing below them is
 * ever visited.
 */

/*
 * Defines the operations for scanning a project tree.
 * Implementations return the accepted files as a flat list sorted by relative
 * path. Problems with individual directories are not errors for the caller:
 * a missing or unreadable root simply produces an empty list.
 */
pub trait FileSystemScannerOperations {
    fn scan_directory(&self, root_path: &Path, config: &CollectorConfig) -> Vec<FileEntry>;
}

pub struct CoreFileSystemScanner {}

impl CoreFileSystemScanner {
    pub fn new() -> Self {
        CoreFileSystemScanner {}
    }
}

impl Default for CoreFileSystemScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemScannerOperations for CoreFileSystemScanner {
    /*
     * Walks `root_path` depth-first without following symbolic links, skipping
     * any directory (below the root) whose name is in the ignore set. Every
     * regular file, or symlink that is not a link to a directory, whose name
     * passes `accepts_file_name` becomes a `FileEntry`. The result is sorted by
     * relative path.
     */
    fn scan_directory(&self, root_path: &Path, config: &CollectorConfig) -> Vec<FileEntry> {
        log::debug!("FileSystemScanner: Scanning directory {root_path:?}.");

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_pruned_dir(entry, config));

        let mut entries: Vec<FileEntry> = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("FileSystemScanner: Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !is_file_candidate(&entry) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !config.accepts_file_name(&file_name) {
                log::trace!("FileSystemScanner: Not collecting {:?}.", entry.path());
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(root_path)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .into_owned();
            log::trace!("FileSystemScanner: Collecting {relative_path}.");
            entries.push(FileEntry::new(relative_path, entry.path().to_path_buf()));
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        log::debug!(
            "FileSystemScanner: Scan complete. Found {} matching files under {:?}.",
            entries.len(),
            root_path
        );
        entries
    }
}

// The root is always walked, even if its own name is on the ignore list.
fn is_pruned_dir(entry: &DirEntry, config: &CollectorConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let pruned = config.is_ignored_dir(entry.file_name());
    if pruned {
        log::trace!(
            "FileSystemScanner: Pruning ignored directory {:?}.",
            entry.path()
        );
    }
    pruned
}

// Symlinks are candidates unless they resolve to a directory. A dangling link is
// kept so the read failure shows up in the archive.
fn is_file_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn relative_paths(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative_path.as_str()).collect()
    }

    fn os_path(parts: &[&str]) -> String {
        parts
            .iter()
            .collect::<PathBuf>()
            .to_string_lossy()
            .into_owned()
    }

    fn setup_project(base_path: &Path) -> io::Result<()> {
        fs::create_dir_all(base_path.join("backend/src/main/java"))?;
        fs::create_dir_all(base_path.join("frontend/src"))?;
        fs::create_dir_all(base_path.join("frontend/node_modules/react"))?;
        fs::create_dir_all(base_path.join("backend/target/classes"))?;
        fs::create_dir_all(base_path.join(".git/hooks"))?;

        fs::write(
            base_path.join("backend/src/main/java/App.java"),
            "class App {}\n",
        )?;
        fs::write(base_path.join("backend/Dockerfile"), "FROM eclipse-temurin\n")?;
        fs::write(base_path.join("backend/README.md"), "# backend\n")?;
        fs::write(base_path.join("frontend/src/index.js"), "render();\n")?;
        fs::write(
            base_path.join("frontend/src/App.jsx"),
            "export default App;\n",
        )?;
        fs::write(base_path.join("frontend/package.json"), "{}\n")?;
        fs::write(
            base_path.join("frontend/node_modules/react/index.js"),
            "module.exports = {};\n",
        )?;
        fs::write(
            base_path.join("backend/target/classes/application.yml"),
            "a: 1\n",
        )?;
        fs::write(base_path.join(".git/hooks/pre-commit.sql"), "select 1;\n")?;
        fs::write(base_path.join("docker-compose.yml"), "services: {}\n")?;
        Ok(())
    }

    #[test]
    fn test_scan_selects_matching_files_sorted() -> io::Result<()> {
        let dir = tempdir()?;
        setup_project(dir.path())?;
        let scanner = CoreFileSystemScanner::new();

        let entries = scanner.scan_directory(dir.path(), &CollectorConfig::new());

        let mut expected = vec![
            os_path(&["backend", "Dockerfile"]),
            os_path(&["backend", "src", "main", "java", "App.java"]),
            os_path(&["docker-compose.yml"]),
            os_path(&["frontend", "package.json"]),
            os_path(&["frontend", "src", "App.jsx"]),
            os_path(&["frontend", "src", "index.js"]),
        ];
        expected.sort();
        assert_eq!(relative_paths(&entries), expected);

        let app = &entries[1];
        assert_eq!(
            app.absolute_path,
            dir.path().join("backend/src/main/java/App.java")
        );
        Ok(())
    }

    #[test]
    fn test_scan_prunes_ignored_dirs_at_any_depth() -> io::Result<()> {
        let dir = tempdir()?;
        let deep = dir.path().join("a/b/c/node_modules/pkg");
        fs::create_dir_all(&deep)?;
        fs::write(deep.join("lib.js"), "x\n")?;
        fs::create_dir_all(dir.path().join("a/b/venv/lib"))?;
        fs::write(dir.path().join("a/b/venv/lib/site.css"), "x\n")?;
        fs::write(dir.path().join("a/b/c/keep.css"), "x\n")?;

        let entries =
            CoreFileSystemScanner::new().scan_directory(dir.path(), &CollectorConfig::new());

        assert_eq!(
            relative_paths(&entries),
            vec![os_path(&["a", "b", "c", "keep.css"])]
        );
        Ok(())
    }

    #[test]
    fn test_scan_root_named_like_ignored_dir_is_walked() -> io::Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("build");
        fs::create_dir_all(&root)?;
        fs::write(root.join("schema.sql"), "create table t();\n")?;

        let entries = CoreFileSystemScanner::new().scan_directory(&root, &CollectorConfig::new());

        assert_eq!(relative_paths(&entries), vec!["schema.sql"]);
        Ok(())
    }

    #[test]
    fn test_scan_file_named_like_ignored_dir_is_not_pruned() -> io::Result<()> {
        let dir = tempdir()?;
        // Regular files are only matched by name rules, never by the ignore list.
        fs::write(dir.path().join("target"), "not a directory\n")?;
        fs::write(dir.path().join("env.yaml"), "key: value\n")?;

        let entries =
            CoreFileSystemScanner::new().scan_directory(dir.path(), &CollectorConfig::new());

        assert_eq!(relative_paths(&entries), vec!["env.yaml"]);
        Ok(())
    }

    #[test]
    fn test_scan_nonexistent_root_yields_nothing() {
        let missing = Path::new("this_directory_should_not_exist_for_scan_test");
        assert!(!missing.exists());

        let entries = CoreFileSystemScanner::new().scan_directory(missing, &CollectorConfig::new());

        assert!(entries.is_empty());
    }

    #[test]
    fn test_scan_orders_by_relative_path_string() -> io::Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("a"))?;
        fs::write(dir.path().join("a.sql"), "")?;
        fs::write(dir.path().join("a/z.sql"), "")?;
        fs::write(dir.path().join("B.sql"), "")?;
        fs::write(dir.path().join("a-b.sql"), "")?;

        let entries =
            CoreFileSystemScanner::new().scan_directory(dir.path(), &CollectorConfig::new());

        let paths = relative_paths(&entries);
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
        assert_eq!(paths[0], "B.sql");
        assert_eq!(paths.len(), 4);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_collects_file_symlinks_without_descending_dir_symlinks() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = tempdir()?;
        let root = dir.path().join("project");
        fs::create_dir_all(&root)?;
        let outside = dir.path().join("outside");
        fs::create_dir_all(&outside)?;
        fs::write(outside.join("x.js"), "outside\n")?;
        fs::write(root.join("real.js"), "real\n")?;
        symlink(root.join("real.js"), root.join("link.js"))?;
        symlink(&outside, root.join("linked_dir"))?;

        let entries = CoreFileSystemScanner::new().scan_directory(&root, &CollectorConfig::new());

        assert_eq!(relative_paths(&entries), vec!["link.js", "real.js"]);
        assert_eq!(entries[0].absolute_path, root.join("link.js"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_keeps_dangling_symlink() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = tempdir()?;
        fs::write(dir.path().join("real.js"), "real\n")?;
        symlink(dir.path().join("gone.js"), dir.path().join("dangling.js"))?;

        let entries =
            CoreFileSystemScanner::new().scan_directory(dir.path(), &CollectorConfig::new());

        assert_eq!(relative_paths(&entries), vec!["dangling.js", "real.js"]);
        Ok(())
    }
}
