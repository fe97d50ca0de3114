//! On-disk format of a dummy file.
//!
//! A dummy stands in for a real file `<name>`: it is called `<name>.dummy`
//! and holds a single line `size=<bytes>` recording the original length.

use std::{
    ffi::{OsStr, OsString},
    fs::{self, File},
    io::{BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};

pub const DUMMY_SUFFIX: &str = ".dummy";

const SIZE_KEY: &str = "size=";

/// Longest first line worth reading: the key, 20 digits of `u64`, newline.
pub const RECORD_LIMIT: u64 = 64;

/// Name of the dummy that stands in for `original`.
pub fn dummy_name(original: &OsStr) -> OsString {
    let mut name = original.to_os_string();
    name.push(DUMMY_SUFFIX);
    name
}

/// Original name behind a dummy file name, or `None` if `name` is not a
/// dummy name. A bare `.dummy` is not a dummy name.
pub fn original_name(name: &OsStr) -> Option<OsString> {
    let name = name.to_str()?;
    let stem = name.strip_suffix(DUMMY_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(OsString::from(stem))
}

/// Write a dummy recording `size` bytes to `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_dummy(path: &Path, size: u64) -> Result<()> {
    fs::write(path, format!("{SIZE_KEY}{size}\n"))
        .with_context(|| format!("failed to write dummy {}", path.display()))
}

/// Size recorded in a dummy file. `Ok(None)` if the content is not a
/// recognizable dummy record, including binary content.
///
/// Only the first line (at most [`RECORD_LIMIT`] bytes) is read.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn read_dummy_size(path: &Path) -> Result<Option<u64>> {
    let file =
        File::open(path).with_context(|| format!("failed to open dummy {}", path.display()))?;
    let mut line = Vec::new();
    BufReader::new(file)
        .take(RECORD_LIMIT)
        .read_until(b'\n', &mut line)
        .with_context(|| format!("failed to read dummy {}", path.display()))?;

    Ok(std::str::from_utf8(&line)
        .ok()
        .and_then(|line| line.trim().strip_prefix(SIZE_KEY))
        .and_then(|v| v.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_both_ways() {
        let dummy = dummy_name(OsStr::new("notes.txt"));
        assert_eq!(dummy, OsString::from("notes.txt.dummy"));
        assert_eq!(original_name(&dummy), Some(OsString::from("notes.txt")));
    }

    #[test]
    fn non_dummy_names_are_rejected() {
        assert_eq!(original_name(OsStr::new("notes.txt")), None);
        assert_eq!(original_name(OsStr::new(".dummy")), None);
        assert_eq!(original_name(OsStr::new("a.DUMMY")), None);
    }

    #[test]
    fn size_round_trips_through_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("a.dummy");
        write_dummy(&path, 12345).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "size=12345\n");
        assert_eq!(read_dummy_size(&path).unwrap(), Some(12345));
    }

    #[test]
    fn garbage_content_has_no_size() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("b.dummy");
        fs::write(&path, "hello").unwrap();
        assert_eq!(read_dummy_size(&path).unwrap(), None);
    }

    #[test]
    fn binary_content_has_no_size() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("x.dummy");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert_eq!(read_dummy_size(&path).unwrap(), None);
    }

    #[test]
    fn oversized_first_line_has_no_size() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("long.dummy");
        fs::write(&path, format!("size=1{}\n", "0".repeat(200))).unwrap();
        assert_eq!(read_dummy_size(&path).unwrap(), None);
    }
}
