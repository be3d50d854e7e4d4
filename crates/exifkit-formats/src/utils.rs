//! Shared utilities for format front-ends.

use crate::{Error, ReadSeek, Result};
use std::io::SeekFrom;

/// Maximum file size to read into memory (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Read the whole stream into memory with a size limit check.
pub fn read_with_limit<R: ReadSeek + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let current = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    let size = end - current;
    reader.seek(SeekFrom::Start(current))?;

    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge(size, MAX_FILE_SIZE));
    }

    let mut data = Vec::with_capacity(size as usize);
    reader.read_to_end(&mut data)?;
    Ok(data)
}
