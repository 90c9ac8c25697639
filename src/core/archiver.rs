/*
 * Writes the combined project archive. The archive is a header block naming the
 * project and the file count, followed by one block per collected file: the
 * relative path framed by separator lines, then the file content.
 *
 * Reading an individual file never fails the archive. Content that is not valid
 * UTF-8 is decoded as Latin-1, and any I/O error is written into the archive as
 * an inline marker in place of the content.
 */
use super::models::{FileEntry, ReadOutcome};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub const SEPARATOR_WIDTH: usize = 80;

/*
 * Defines how file content is read for the archive and how the archive is laid
 * out. Implementors supply `read_file_content`; `write_archive` writes the
 * header block and then every entry in the given order. Only errors from `out`
 * are returned; per-file read problems end up inside the archive text.
 */
pub trait ArchiverOperations {
    fn read_file_content(&self, path: &Path) -> ReadOutcome;

    fn write_archive(
        &self,
        out: &mut dyn Write,
        project_name: &str,
        entries: &[FileEntry],
    ) -> io::Result<()> {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        writeln!(out, "=== Проект: {project_name} ===")?;
        writeln!(out, "Всего файлов: {}", entries.len())?;
        writeln!(out, "{separator}")?;
        writeln!(out)?;

        for entry in entries {
            log::debug!("Archiver: Writing {}", entry.relative_path);
            writeln!(out, "{separator}")?;
            writeln!(out, "Файл: {}", entry.relative_path)?;
            writeln!(out, "{separator}")?;

            match self.read_file_content(&entry.absolute_path) {
                ReadOutcome::Utf8(content) | ReadOutcome::Latin1(content) => {
                    out.write_all(content.as_bytes())?;
                    if !content.ends_with('\n') {
                        writeln!(out)?;
                    }
                }
                ReadOutcome::Failed(message) => {
                    writeln!(out, "[Ошибка чтения файла: {message}]")?;
                }
            }

            write!(out, "\n\n")?;
        }
        Ok(())
    }
}

pub struct CoreArchiver {}

impl CoreArchiver {
    pub fn new() -> Self {
        CoreArchiver {}
    }
}

impl Default for CoreArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiverOperations for CoreArchiver {
    fn read_file_content(&self, path: &Path) -> ReadOutcome {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Archiver: Error reading file {path:?}: {e}");
                return ReadOutcome::Failed(e.to_string());
            }
        };
        match String::from_utf8(bytes) {
            Ok(text) => ReadOutcome::Utf8(text),
            Err(e) => {
                log::debug!(
                    "Archiver: {path:?} is not valid UTF-8 ({e}), decoding as Latin-1."
                );
                ReadOutcome::Latin1(decode_latin1(&e.into_bytes()))
            }
        }
    }
}

// Every byte maps to the code point of the same value, so this cannot fail.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
