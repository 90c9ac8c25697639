/*
 * Runs one collection: scans the project tree, writes the combined archive to
 * the output file, and prints a summary of what was collected. The scanner and
 * archiver are passed in as trait objects so the orchestration can be driven
 * with other implementations in tests.
 *
 * Only problems with the output file (or stdout) are errors here. Everything
 * that can go wrong with an individual input file is absorbed by the scanner or
 * recorded inside the archive by the archiver.
 */
use super::archiver::{ArchiverOperations, CoreArchiver};
use super::config::CollectorConfig;
use super::file_system::{CoreFileSystemScanner, FileSystemScannerOperations};
use super::models::FileEntry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CollectorError {
    OutputFile { path: PathBuf, source: io::Error },
    Report(io::Error),
}

impl std::fmt::Display for CollectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectorError::OutputFile { path, source } => {
                write!(f, "Failed to write output file {path:?}: {source}")
            }
            CollectorError::Report(e) => write!(f, "Failed to print collection summary: {e}"),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectorError::OutputFile { source, .. } => Some(source),
            CollectorError::Report(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectSummary {
    pub file_count: usize,
    pub output_path: PathBuf,
    pub relative_paths: Vec<String>,
}

/*
 * Collects the project rooted at `root_dir` into `output_file` with the default
 * scanner, archiver and configuration, then prints the summary to stdout.
 */
pub fn collect(root_dir: &Path, output_file: &Path) -> Result<CollectSummary> {
    let summary = collect_with(
        &CoreFileSystemScanner::new(),
        &CoreArchiver::new(),
        &CollectorConfig::default(),
        root_dir,
        output_file,
    )?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, &summary).map_err(CollectorError::Report)?;
    Ok(summary)
}

pub fn collect_with(
    scanner: &dyn FileSystemScannerOperations,
    archiver: &dyn ArchiverOperations,
    config: &CollectorConfig,
    root_dir: &Path,
    output_file: &Path,
) -> Result<CollectSummary> {
    log::info!("Collector: Collecting project files from {root_dir:?} into {output_file:?}.");
    let entries: Vec<FileEntry> = scanner.scan_directory(root_dir, config);

    let output_error = |source: io::Error| CollectorError::OutputFile {
        path: output_file.to_path_buf(),
        source,
    };
    let file = File::create(output_file).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    archiver
        .write_archive(&mut writer, &project_display_name(root_dir), &entries)
        .map_err(output_error)?;
    writer.flush().map_err(output_error)?;

    log::info!("Collector: Wrote {} files to {:?}.", entries.len(), output_file);
    Ok(CollectSummary {
        file_count: entries.len(),
        output_path: output_file.to_path_buf(),
        relative_paths: entries.into_iter().map(|e| e.relative_path).collect(),
    })
}

pub fn write_summary(out: &mut dyn Write, summary: &CollectSummary) -> io::Result<()> {
    writeln!(out, "✓ Собрано {} файлов", summary.file_count)?;
    writeln!(out, "✓ Результат сохранён в: {}", summary.output_path.display())?;
    writeln!(out)?;
    writeln!(out, "Собранные файлы:")?;
    for relative_path in &summary.relative_paths {
        writeln!(out, "  - {relative_path}")?;
    }
    Ok(())
}

/*
 * The project name shown in the archive title: the text after the last path
 * separator of `root_dir` as it was given. "." stays ".", and a path ending in
 * a separator gives an empty name.
 */
fn project_display_name(root_dir: &Path) -> String {
    root_dir
        .to_string_lossy()
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or_default()
        .to_string()
}
