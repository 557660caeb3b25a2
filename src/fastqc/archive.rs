//! Discovery and extraction of the FastQC archives within a sample directory.

use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::errors::IngestError;
use crate::errors::MAX_ARCHIVES_PER_SAMPLE;
use crate::sample::ReadIndex;

/// The extension FastQC uses for its archives.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Lists the archives directly within `directory`, sorted by filename. The
/// position in the returned list determines the read index of each archive.
pub fn discover(directory: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_error = |source| IngestError::Io {
        path: directory.to_path_buf(),
        source,
    };

    let mut archives = Vec::new();
    for entry in fs::read_dir(directory).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == ARCHIVE_EXTENSION) {
            archives.push(path);
        }
    }

    match archives.len() {
        0 => Err(IngestError::NoArchivesFound(directory.to_path_buf())),
        count if count > MAX_ARCHIVES_PER_SAMPLE => Err(IngestError::TooManyArchives {
            directory: directory.to_path_buf(),
            count,
        }),
        _ => {
            archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            Ok(archives)
        }
    }
}

/// The directory an archive is expected to extract to: the archive path with
/// its extension removed.
pub fn extraction_target(archive: &Path) -> PathBuf {
    archive.with_extension("")
}

/// Extracts `archive` into `destination` and returns the directory the
/// archive's contents are expected to live in. Any previously extracted copy
/// is removed first so that stale files never survive a re-run.
pub fn extract(archive: &Path, destination: &Path) -> Result<PathBuf, IngestError> {
    let failed = |source: ZipError| IngestError::ExtractionFailed {
        archive: archive.to_path_buf(),
        source,
    };

    let target = extraction_target(archive);
    if target.is_dir() {
        debug!("  [*] Removing previously extracted {}", target.display());
        fs::remove_dir_all(&target).map_err(|e| failed(ZipError::Io(e)))?;
    }

    let file = File::open(archive).map_err(|e| failed(ZipError::Io(e)))?;
    let mut zip = ZipArchive::new(file).map_err(failed)?;
    zip.extract(destination).map_err(failed)?;

    debug!(
        "  [*] Extracted {} ({} entries)",
        archive.display(),
        zip.len()
    );

    Ok(target)
}

/// Discovers and extracts every archive within a sample directory, returning
/// the extracted directory for each read.
pub fn extract_reads(directory: &Path) -> Result<BTreeMap<ReadIndex, PathBuf>, IngestError> {
    let archives = discover(directory)?;

    let mut read_dirs = BTreeMap::new();
    for (position, archive) in archives.iter().enumerate() {
        let read_dir = extract(archive, directory)?;
        read_dirs.insert(ReadIndex::from_position(position), read_dir);
    }

    Ok(read_dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::write_archive;

    #[test]
    fn test_discover_without_archives() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "nothing here").unwrap();

        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::NoArchivesFound(_)));
    }

    #[test]
    fn test_discover_with_too_many_archives() {
        let dir = tempfile::tempdir().unwrap();
        for stem in ["s_1_fastqc", "s_2_fastqc", "s_3_fastqc"] {
            write_archive(dir.path(), stem, &[("summary.txt", "")]);
        }

        match discover(dir.path()).unwrap_err() {
            IngestError::TooManyArchives { count, .. } => assert_eq!(count, 3),
            err => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn test_discover_sorts_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path(), "s_2_fastqc", &[("summary.txt", "")]);
        write_archive(dir.path(), "s_1_fastqc", &[("summary.txt", "")]);

        let archives = discover(dir.path()).unwrap();
        let names: Vec<_> = archives
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["s_1_fastqc.zip", "s_2_fastqc.zip"]);
    }

    #[test]
    fn test_extract_reads_assigns_read_indices() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path(), "s_2_fastqc", &[("summary.txt", "PASS\tA\n")]);
        write_archive(dir.path(), "s_1_fastqc", &[("summary.txt", "FAIL\tA\n")]);

        let read_dirs = extract_reads(dir.path()).unwrap();
        assert_eq!(read_dirs.len(), 2);
        assert_eq!(
            read_dirs[&ReadIndex::from_position(0)],
            dir.path().join("s_1_fastqc")
        );
        assert_eq!(
            read_dirs[&ReadIndex::from_position(1)],
            dir.path().join("s_2_fastqc")
        );
        assert!(dir.path().join("s_1_fastqc").join("summary.txt").is_file());
    }

    #[test]
    fn test_extract_removes_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), "s_1_fastqc", &[("summary.txt", "PASS\tA\n")]);

        let stale = dir.path().join("s_1_fastqc").join("stale.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "left over").unwrap();

        let target = extract(&archive, dir.path()).unwrap();
        assert!(!stale.exists());
        assert_eq!(
            fs::read_to_string(target.join("summary.txt")).unwrap(),
            "PASS\tA\n"
        );
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, "this is not a zip file").unwrap();

        let err = extract(&archive, dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::ExtractionFailed { .. }));
    }
}
