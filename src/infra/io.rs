//! File reading: mmap for large files, buffered read otherwise.

use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// A file's contents, either memory-mapped or read into a String.
#[derive(Debug)]
pub enum FileContent {
    Mapped(Mmap),
    Buffered(String),
}

impl FileContent {
    /// View as UTF-8 text. A mapped file with invalid UTF-8 surfaces an
    /// `InvalidData` error (the buffered path already validated on read).
    pub fn as_str(&self) -> io::Result<&str> {
        match self {
            FileContent::Mapped(mmap) => std::str::from_utf8(mmap)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            FileContent::Buffered(text) => Ok(text.as_str()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Mapped(mmap) => mmap,
            FileContent::Buffered(text) => text.as_bytes(),
        }
    }
}

/// Read a file, memory-mapping it past the size threshold.
///
/// Callers map the `io::Error` into the pipeline taxonomy; this layer
/// only performs the read.
pub fn read_file_smart<P: AsRef<Path>>(path: P) -> io::Result<FileContent> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)?;

    if metadata.len() > MMAP_THRESHOLD {
        let file = File::open(path)?;
        // Safety: the map is read-only and lives as long as the content
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(FileContent::Mapped(mmap))
    } else {
        Ok(FileContent::Buffered(std::fs::read_to_string(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_small_file_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.txt");
        std::fs::write(&path, "hello\nworld\n").unwrap();

        let content = read_file_smart(&path).unwrap();
        assert!(matches!(content, FileContent::Buffered(_)));
        assert_eq!(content.as_str().unwrap(), "hello\nworld\n");
    }

    #[test]
    fn missing_file_surfaces_not_found() {
        let err = read_file_smart("no/such/file.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn mapped_invalid_utf8_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        // Past the mmap threshold, ending in invalid UTF-8
        let mut bytes = vec![b'a'; (MMAP_THRESHOLD + 8) as usize];
        bytes.extend_from_slice(&[0xFF, 0xFE, 0xFD]);
        std::fs::write(&path, &bytes).unwrap();

        let content = read_file_smart(&path).unwrap();
        assert!(matches!(content, FileContent::Mapped(_)));
        assert_eq!(content.as_bytes().len(), bytes.len());

        let err = content.as_str().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // The pipeline shows this as an encoding diagnostic, not a
        // zero-line file
        let mapped = crate::core::error::NanodocError::from_io(err, &path);
        assert!(mapped.to_string().contains("UTF-8"), "message: {mapped}");
    }
}
