use std::path::PathBuf;

// A file selected for collection. `relative_path` is the sort and display key;
// `absolute_path` is where the content is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

impl FileEntry {
    pub fn new(relative_path: String, absolute_path: PathBuf) -> Self {
        FileEntry {
            relative_path,
            absolute_path,
        }
    }
}

/*
 * Result of reading a single file for the archive.
 * A failed read is not an error for the run as a whole; the message is written
 * into the archive in place of the content.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Utf8(String),
    Latin1(String),
    Failed(String),
}
