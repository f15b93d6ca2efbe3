//! Packaging a report directory as a zip archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::ReportError;

/// The archive path for a report directory: a sibling named `<dir>.zip`.
pub fn archive_path(dir: &Path) -> Result<PathBuf, ReportError> {
    let name = dir
        .file_name()
        .ok_or_else(|| ReportError::ArchiveName(dir.display().to_string()))?;
    let mut archive_name = name.to_os_string();
    archive_name.push(".zip");
    Ok(dir.with_file_name(archive_name))
}

/// Zip every entry below `dir` into `<dir>.zip`, using paths relative to `dir`.
///
/// A partially written archive is removed on failure.
pub fn zip_directory(dir: &Path) -> Result<PathBuf, ReportError> {
    let target = archive_path(dir)?;
    match write_archive(dir, &target) {
        Ok(()) => Ok(target),
        Err(err) => {
            let _ = fs::remove_file(&target);
            Err(err)
        }
    }
}

fn write_archive(dir: &Path, target: &Path) -> Result<(), ReportError> {
    let mut writer = ZipWriter::new(File::create(target)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let relative = match entry.path().strip_prefix(dir) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => continue,
        };
        let name = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            debug!("Archiving {}", name);
            writer.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}
