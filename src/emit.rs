use std::io::Write;

use crate::error::TranscodeError;

/// Write `bytes` in one bulk write, then flush.
///
/// An empty payload writes nothing and succeeds.
pub fn emit<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<(), TranscodeError> {
    if bytes.is_empty() {
        return Ok(());
    }
    writer.write_all(bytes).map_err(TranscodeError::Write)?;
    writer.flush().map_err(TranscodeError::Write)
}
