/*
 * Holds the fixed selection rules of the collector: which file extensions and
 * exact filenames are accepted, and which directory names are never descended
 * into. The sets are compile-time constants; `CollectorConfig` wraps them so the
 * matching rules live next to the data they match against.
 */
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

pub const ACCEPTED_EXTENSIONS: &[&str] = &[".java", ".yaml", ".yml", ".js", ".jsx", ".css", ".sql"];

pub const SPECIAL_FILE_NAMES: &[&str] = &[
    "Dockerfile",
    "nginx.json",
    "package.json",
    "package-lock.json",
];

pub const IGNORED_DIR_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "build",
    "dist",
    "__pycache__",
    ".idea",
    ".vscode",
    "venv",
    "env",
];

/*
 * Immutable selection rules for one collection run.
 * Extensions are stored with their leading dot, exactly as they are compared.
 */
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    extensions: HashSet<&'static str>,
    special_file_names: HashSet<&'static str>,
    ignored_dir_names: HashSet<&'static str>,
}

impl CollectorConfig {
    pub fn new() -> Self {
        CollectorConfig {
            extensions: ACCEPTED_EXTENSIONS.iter().copied().collect(),
            special_file_names: SPECIAL_FILE_NAMES.iter().copied().collect(),
            ignored_dir_names: IGNORED_DIR_NAMES.iter().copied().collect(),
        }
    }

    /*
     * Returns true if a file with this name should be collected, either because
     * its extension is accepted (case-sensitive) or because the whole name is one
     * of the special filenames.
     */
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        if self.special_file_names.contains(file_name) {
            return true;
        }
        match file_suffix(file_name) {
            Some(suffix) => self.extensions.contains(suffix.as_str()),
            None => false,
        }
    }

    pub fn is_ignored_dir(&self, dir_name: &OsStr) -> bool {
        dir_name
            .to_str()
            .is_some_and(|name| self.ignored_dir_names.contains(name))
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/*
 * The extension of a filename including its dot, e.g. ".yml".
 * Dotfiles such as ".js" have no extension; "name." has the suffix ".".
 */
fn file_suffix(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}
