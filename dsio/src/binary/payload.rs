//! Raw payload encoding
//!
//! Payloads are row-major little-endian element bytes with no header. On
//! little-endian hosts the element buffer is cast directly with `bytemuck`.

use crate::error::{Error, IoResultExt, Result};
use crate::dataset::DatasetElement;
use dsio_core::DsioError;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// View or copy an element buffer as little-endian bytes
pub(crate) fn encode<T: DatasetElement>(data: &[T]) -> Cow<'_, [u8]> {
    #[cfg(target_endian = "little")]
    {
        Cow::Borrowed(bytemuck::cast_slice(data))
    }
    #[cfg(target_endian = "big")]
    {
        let size = T::size_bytes();
        let mut bytes = vec![0u8; data.len() * size];
        for (value, out) in data.iter().zip(bytes.chunks_exact_mut(size)) {
            // chunks_exact_mut yields exactly `size` bytes
            let _ = value.write_le(out);
        }
        Cow::Owned(bytes)
    }
}

/// Decode little-endian bytes into elements. `bytes.len()` must be a
/// multiple of the element size.
pub(crate) fn decode<T: DatasetElement>(bytes: &[u8]) -> std::result::Result<Vec<T>, DsioError> {
    dsio_core::validation::validate_array_bounds::<T>(bytes.len())?;

    #[cfg(target_endian = "little")]
    {
        Ok(bytemuck::pod_collect_to_vec(bytes))
    }
    #[cfg(target_endian = "big")]
    {
        bytes.chunks_exact(T::size_bytes()).map(T::from_le_slice).collect()
    }
}

/// Read exactly `len` leading bytes of the payload and decode them.
///
/// The caller has already checked that the file holds at least `len` bytes.
#[cfg(feature = "mmap")]
pub(crate) fn read_prefix<T: DatasetElement>(file: File, path: &Path, len: usize) -> Result<Vec<T>> {
    use memmap2::MmapOptions;

    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: read-only mapping of a file this process does not modify while
    // the map is alive; the map is dropped before returning.
    let mmap = unsafe { MmapOptions::new().len(len).map(&file).at_path(path)? };
    debug!(path = %path.display(), len, "payload mapped");
    decode(&mmap[..len]).map_err(|err| Error::format(path, err))
}

/// Read exactly `len` leading bytes of the payload and decode them.
///
/// The caller has already checked that the file holds at least `len` bytes.
#[cfg(not(feature = "mmap"))]
pub(crate) fn read_prefix<T: DatasetElement>(file: File, path: &Path, len: usize) -> Result<Vec<T>> {
    use std::io::{BufReader, Read};

    let mut bytes = Vec::with_capacity(len);
    BufReader::new(file)
        .take(len as u64)
        .read_to_end(&mut bytes)
        .at_path(path)?;
    if bytes.len() < len {
        // File shrank between the size check and the read
        return Err(Error::TruncatedData {
            path: path.to_path_buf(),
            expected: len as u64,
            actual: bytes.len() as u64,
        });
    }
    debug!(path = %path.display(), len, "payload read");
    decode(&bytes).map_err(|err| Error::format(path, err))
}
