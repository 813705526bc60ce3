//! Streaming SHA-256 computation with progress reporting.
//!
//! Parameter files run to hundreds of megabytes, so digests are computed
//! in fixed-size chunks with byte progress forwarded to the caller's
//! [`ProgressSink`] rather than reading whole files into memory.

use crate::artifact::sha256_digest::Sha256Digest;
use crate::progress::ProgressSink;
use camino::Utf8Path;
use log::debug;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;

/// Chunk size for streaming reads and writes.
pub(crate) const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 digest of the file at `path`.
///
/// Reads the file in 8 KiB chunks, reporting cumulative bytes against
/// the file's length after each chunk, and returns the lowercase hex
/// digest as a validated [`Sha256Digest`].
///
/// # Errors
///
/// Returns the underlying [`std::io::Error`] if the file cannot be
/// opened or read.
pub fn digest_file(
    path: &Utf8Path,
    sink: &mut dyn ProgressSink,
) -> std::io::Result<Sha256Digest> {
    let mut file = fs::File::open(path)?;
    let total = file.metadata()?.len();
    debug!("digest_file: hashing {path} ({total} bytes)");

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut seen: u64 = 0;
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        seen += bytes_read as u64;
        sink.report_progress(seen, total);
    }
    let hex = format!("{:x}", hasher.finalize());
    // sha2 always produces valid 64-char lowercase hex.
    Ok(Sha256Digest::try_from(hex).expect("sha2 produces valid 64-char lowercase hex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingSink, sha256_hex};
    use camino::Utf8PathBuf;

    fn temp_file(contents: &[u8]) -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(temp.path().join("data.bin")).expect("UTF-8 path");
        std::fs::write(&path, contents).expect("write test file");
        (temp, path)
    }

    #[test]
    fn digest_matches_in_memory_computation() {
        let (_temp, path) = temp_file(b"0123456789");
        let mut sink = RecordingSink::approving();
        let digest = digest_file(&path, &mut sink).expect("digest succeeds");
        assert_eq!(digest.as_str(), sha256_hex(b"0123456789"));
    }

    #[test]
    fn reports_cumulative_progress_up_to_file_length() {
        let contents = vec![7u8; CHUNK_SIZE + 100];
        let (_temp, path) = temp_file(&contents);
        let mut sink = RecordingSink::approving();
        digest_file(&path, &mut sink).expect("digest succeeds");

        let total = contents.len() as u64;
        assert_eq!(
            sink.progress,
            vec![(CHUNK_SIZE as u64, total), (total, total)]
        );
    }

    #[test]
    fn empty_file_digests_without_progress() {
        let (_temp, path) = temp_file(b"");
        let mut sink = RecordingSink::approving();
        let digest = digest_file(&path, &mut sink).expect("digest succeeds");
        assert_eq!(digest.as_str(), sha256_hex(b""));
        assert!(sink.progress.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(temp.path().join("absent.bin")).expect("UTF-8 path");
        let mut sink = RecordingSink::approving();
        let result = digest_file(&path, &mut sink);
        assert!(result.is_err());
    }
}
