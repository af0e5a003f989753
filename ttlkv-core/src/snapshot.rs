//! Line-oriented snapshot format.
//!
//! Each live entry becomes one compact JSON object followed by CRLF:
//!
//! ```text
//! {"key":"a","value":"1","remainingLifespanMs":99987}\r\n
//! ```
//!
//! An empty table encodes to an empty string and an empty file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Line terminator between records
pub const LINE_SEPARATOR: &str = "\r\n";

/// Distinguishes temp files of concurrent dumps in the same process
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// One entry as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub key: String,
    pub value: String,
    /// Milliseconds left before expiry at the moment the snapshot was taken
    #[serde(rename = "remainingLifespanMs")]
    pub remaining_lifespan_ms: u64,
}

/// Encodes records into the snapshot text, one CRLF-terminated line each.
pub fn encode(records: &[SnapshotRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record).map_err(StoreError::Serialization)?;
        out.push_str(&line);
        out.push_str(LINE_SEPARATOR);
    }
    Ok(out)
}

/// Parses a single snapshot line. `line_no` is 1-based and only used for errors.
///
/// Works on raw bytes so that invalid UTF-8 is reported against its line.
pub fn decode_line(line: impl AsRef<[u8]>, line_no: usize) -> Result<SnapshotRecord> {
    serde_json::from_slice(line.as_ref()).map_err(|source| StoreError::MalformedSnapshot {
        line: line_no,
        source,
    })
}

/// Lazily decodes every non-blank line of `contents`.
///
/// Lines end in `\n` with an optional `\r` before it. The iterator yields an
/// `Err` for each malformed line; `Store::load` stops at the first one.
pub fn decode(contents: &[u8]) -> impl Iterator<Item = Result<SnapshotRecord>> + '_ {
    contents
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .map(|(idx, line)| decode_line(line, idx + 1))
}

/// Writes the snapshot, replacing any previous one.
///
/// Contents go to a sibling temp file first and are renamed into place, so a
/// concurrent `load` sees either the old snapshot or the new one.
pub async fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    debug!(path = ?path, bytes = contents.len(), "Snapshot written");
    Ok(())
}

/// Reads the whole snapshot file as raw bytes.
pub async fn read_snapshot(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::SnapshotNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", std::process::id(), seq));
    path.with_file_name(name)
}
