//! File checks shared by every source kind.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::UTF_8;
use tracing::warn;

use crate::error::{IngestError, Result};

/// Maximum source file size (50 MB default).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size against the default limit.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Validate that a text file is not UTF-16.
///
/// Checks for UTF-16 BOM markers, which are not supported. A UTF-8 BOM is
/// accepted and removed when the file is decoded.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a whole file into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| open_error(path, e))
}

/// Decodes UTF-8 text, dropping a leading byte-order mark.
///
/// Invalid sequences are replaced with U+FFFD and logged.
pub fn decode_utf8(bytes: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("input contained invalid UTF-8; replaced with U+FFFD");
    }
    text.into_owned()
}

/// Reads and decodes a UTF-8 text file.
pub fn read_text_file(path: &Path) -> Result<String> {
    validate_encoding(path)?;
    let bytes = read_bytes(path)?;
    Ok(decode_utf8(&bytes))
}
