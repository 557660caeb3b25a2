//! Builders for FastQC-shaped directories used throughout the tests.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::write::FileOptions;
use zip::ZipWriter;

/// Writes `<dir>/<stem>.zip` containing a `<stem>/` folder with the given
/// files, mirroring how FastQC lays out its archives.
pub fn write_archive(dir: &Path, stem: &str, files: &[(&str, &str)]) -> PathBuf {
    let files: Vec<_> = files
        .iter()
        .map(|(name, contents)| (*name, contents.as_bytes()))
        .collect();
    write_archive_bytes(dir, stem, &files)
}

/// Like [`write_archive`], for file contents that are not valid UTF-8.
pub fn write_archive_bytes(dir: &Path, stem: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(format!("{}.zip", stem));
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = FileOptions::default();

    zip.add_directory(format!("{}/", stem), options).unwrap();
    for (name, contents) in files {
        zip.start_file(format!("{}/{}", stem, name), options)
            .unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();

    path
}

/// A summary file where every listed module has the given status.
pub fn summary(lines: &[(&str, &str)], filename: &str) -> String {
    lines
        .iter()
        .map(|(status, module)| format!("{}\t{}\t{}\n", status, module, filename))
        .collect()
}

/// A minimal `fastqc_data.txt` with the basic statistics block.
pub fn fastqc_data(filename: &str, total_sequences: usize) -> String {
    format!(
        "##FastQC\t0.11.9\n\
        >>Basic Statistics\tpass\n\
        #Measure\tValue\n\
        Filename\t{}\n\
        File type\tConventional base calls\n\
        Encoding\tSanger / Illumina 1.9\n\
        Total Sequences\t{}\n\
        Sequences flagged as poor quality\t0\n\
        Sequence length\t151\n\
        %GC\t48\n\
        >>END_MODULE\n",
        filename, total_sequences
    )
}

/// Creates `<parent>/<name>/` with one complete FastQC archive per read. Each
/// read is described by its archive stem and summary contents.
pub fn write_sample(parent: &Path, name: &str, reads: &[(&str, String)]) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).unwrap();

    for (stem, summary) in reads {
        let data = fastqc_data(&format!("{}.fastq.gz", stem), 1000);
        write_archive(
            &dir,
            stem,
            &[
                ("summary.txt", summary.as_str()),
                ("fastqc_data.txt", data.as_str()),
                ("fastqc_report.html", "<html></html>"),
            ],
        );
    }

    dir
}
