//! File-level glue around the codec: naming, atomic writes, size stats.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// `book.txt` -> `book.bin`
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension("bin")
}

/// `book.bin` -> `book_decompressed.txt`
pub fn decompressed_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_stem().map(OsString::from).unwrap_or_default();
    name.push("_decompressed.txt");
    artifact.with_file_name(name)
}

/// `out.bin` -> `.out.bin.<pid>.tmp`, distinct per writing process.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Writes to a sibling temporary file and renames it over `path`, so a
/// failed write never leaves a complete-looking output behind.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    } else {
        debug!("wrote {}", path.display());
    }
    result
}

/// Size reduction in percent; negative when the output grew.
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - compressed as f64) / original as f64 * 100.0
}
