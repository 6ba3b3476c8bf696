//! Reading and writing buffers to disk.
//!
//! The buffer itself never touches the file system. This module turns
//! file contents into a [`LineBuffer`] and back, and reports failures as
//! a [`FileError`] without ever modifying the buffer it was given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::editor::LineBuffer;

/// Failure at the file boundary.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{} is not valid UTF-8", .0.display())]
    Decode(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("buffer has no file name")]
    Untitled,
}

/// Options applied to buffers created from files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    pub tab_width: usize,
    pub auto_indent: bool,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            tab_width: crate::editor::DEFAULT_TAB_WIDTH,
            auto_indent: true,
        }
    }
}

impl BufferOptions {
    /// An empty buffer carrying these options.
    pub fn empty_buffer(self) -> LineBuffer {
        LineBuffer::new()
            .with_tab_width(self.tab_width)
            .with_auto_indent(self.auto_indent)
    }
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FileError::FileNotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
        _ => FileError::Read {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    String::from_utf8(bytes).map_err(|_| FileError::Decode(path.to_path_buf()))
}

/// Write text to a file, replacing its contents.
pub fn write_text(path: &Path, text: &str) -> Result<(), FileError> {
    fs::write(path, text).map_err(|source| FileError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a file into a new buffer bound to `path`.
pub fn open_buffer(path: &Path, options: BufferOptions) -> Result<LineBuffer, FileError> {
    let text = read_text(path)?;
    let buffer = LineBuffer::from_text(&text)
        .with_path(path)
        .with_tab_width(options.tab_width)
        .with_auto_indent(options.auto_indent);
    tracing::debug!(
        path = %path.display(),
        lines = buffer.line_count(),
        "opened buffer"
    );
    Ok(buffer)
}

/// Write a buffer to its own path and clear its modified flag.
///
/// Returns the path that was written.
pub fn save_buffer(buffer: &mut LineBuffer) -> Result<PathBuf, FileError> {
    let path = buffer.path().ok_or(FileError::Untitled)?.to_path_buf();
    write_text(&path, &buffer.contents())?;
    buffer.mark_saved();
    tracing::debug!(path = %path.display(), "saved buffer");
    Ok(path)
}

/// Write a buffer to a new path; the buffer adopts the path only on success.
pub fn save_buffer_as(buffer: &mut LineBuffer, path: &Path) -> Result<PathBuf, FileError> {
    write_text(path, &buffer.contents())?;
    buffer.set_path(path);
    buffer.mark_saved();
    tracing::debug!(path = %path.display(), "saved buffer under new name");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FileError::FileNotFound(_)));
    }

    #[test]
    fn test_read_invalid_utf8_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_text(&path), Err(FileError::Decode(_))));
    }

    #[test]
    fn test_read_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let err = read_text(dir.path()).unwrap_err();
        assert!(!matches!(err, FileError::Decode(_) | FileError::Untitled));
    }

    #[test]
    fn test_open_buffer_sets_path_and_options() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.py");
        fs::write(&path, "print(1)\n").unwrap();

        let options = BufferOptions {
            tab_width: 2,
            auto_indent: false,
        };
        let buffer = open_buffer(&path, options).unwrap();
        assert_eq!(buffer.path(), Some(path.as_path()));
        assert_eq!(buffer.text(), "print(1)\n");
        assert_eq!(buffer.tab_width(), 2);
        assert!(!buffer.auto_indent());
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_save_untitled_buffer_fails() {
        let mut buffer = LineBuffer::new();
        buffer.insert("x");
        assert!(matches!(save_buffer(&mut buffer), Err(FileError::Untitled)));
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_save_buffer_writes_and_clears_modified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut buffer = LineBuffer::new().with_path(&path);
        buffer.insert("hello\nworld");

        let written = save_buffer(&mut buffer).unwrap();
        assert_eq!(written, path);
        assert!(!buffer.is_modified());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld");
    }

    #[test]
    fn test_save_as_failure_keeps_path_and_flag() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("a.txt");
        let mut buffer = LineBuffer::new().with_path(&original);
        buffer.insert("x");

        let bad = dir.path().join("no-such-dir").join("b.txt");
        let err = save_buffer_as(&mut buffer, &bad).unwrap_err();
        assert!(matches!(err, FileError::WriteFailed { .. }));
        assert_eq!(buffer.path(), Some(original.as_path()));
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_save_as_adopts_new_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.md");
        let mut buffer = LineBuffer::new();
        buffer.insert("# title");

        save_buffer_as(&mut buffer, &path).unwrap();
        assert_eq!(buffer.path(), Some(path.as_path()));
        assert_eq!(buffer.language(), crate::language::Language::Markdown);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_crlf_round_trip_is_lossless() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let mut buffer = open_buffer(&path, BufferOptions::default()).unwrap();
        buffer.move_to(1, 3);
        buffer.insert("!");
        save_buffer(&mut buffer).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\ntwo!\r\n");
    }
}
