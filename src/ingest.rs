//! Buffer a stream of unknown length in memory.

use std::io::{self, Read};

use crate::error::TranscodeError;
use crate::limits::BufferPolicy;

/// Input bytes read to exhaustion.
///
/// The backing storage is `buffer_size` bytes long; only the first
/// `data_size` are input.
#[derive(Debug)]
pub struct InputBuffer {
    buf: Vec<u8>,
    data_size: usize,
}

impl InputBuffer {
    /// The bytes read from the input.
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.data_size]
    }

    /// Number of bytes read.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Allocated capacity.
    pub fn buffer_size(&self) -> usize {
        self.buf.len()
    }

    /// Take the input bytes, dropping unused capacity.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.data_size);
        self.buf
    }
}

/// Grow `buf` to `new_size` zeroed bytes, reporting allocation failure.
fn grow(buf: &mut Vec<u8>, new_size: usize) -> Result<(), TranscodeError> {
    let additional = new_size.saturating_sub(buf.len());
    buf.try_reserve_exact(additional)
        .map_err(|source| TranscodeError::Alloc {
            requested: new_size,
            source,
        })?;
    buf.resize(new_size, 0);
    Ok(())
}

/// Read once, retrying on `Interrupted`.
fn read_some<R: Read + ?Sized>(reader: &mut R, dst: &mut [u8]) -> Result<usize, TranscodeError> {
    loop {
        match reader.read(dst) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TranscodeError::Read(e)),
        }
    }
}

/// Read `reader` until it returns zero bytes.
///
/// Capacity starts at `policy.initial_size` and doubles each time a read
/// fills it, up to `policy.max_size`. Input longer than `max_size` fails
/// with [`TranscodeError::CapacityExceeded`] and the buffer is dropped.
pub fn ingest<R: Read + ?Sized>(
    reader: &mut R,
    policy: BufferPolicy,
) -> Result<InputBuffer, TranscodeError> {
    let policy = policy.normalized();
    let mut buf = Vec::new();
    grow(&mut buf, policy.initial_size)?;
    let mut data_size = 0;

    loop {
        let n = read_some(reader, &mut buf[data_size..])?;
        if n == 0 {
            break;
        }
        data_size += n;
        if data_size < buf.len() {
            continue;
        }
        if buf.len() >= policy.max_size {
            // Full at the cap: only an exhausted source fits.
            let mut probe = [0u8; 1];
            if read_some(reader, &mut probe)? == 0 {
                break;
            }
            log::error!("abort: input exceeds {} bytes", policy.max_size);
            return Err(TranscodeError::CapacityExceeded {
                limit: policy.max_size,
            });
        }
        let new_size = buf.len().saturating_mul(2).min(policy.max_size);
        log::debug!("realloc {} -> {new_size}", buf.len());
        grow(&mut buf, new_size)?;
    }

    Ok(InputBuffer { buf, data_size })
}
