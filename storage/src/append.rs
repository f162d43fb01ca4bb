//! Single-line append shared by both output streams.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Opens `path` for append (creating it and its parent directories), writes `line`
/// plus a newline in one `write_all`, flushes, and closes the file.
///
/// If the file does not end with a newline (a torn entry from an interrupted write),
/// the new entry starts on a fresh line so only the torn entry is lost.
pub(crate) fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)?;

    let mut buf = String::with_capacity(line.len() + 2);
    if file.metadata()?.len() > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            buf.push('\n');
        }
    }
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes())?;
    file.flush()
}
