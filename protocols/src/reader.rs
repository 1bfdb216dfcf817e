//! Bounds-checked little-endian cursor over a received datagram.

use crate::DecodeError;

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Starts reading at `pos`. Fails if the buffer does not even reach it.
    pub(crate) fn at(buf: &'a [u8], pos: usize) -> Result<Self, DecodeError> {
        if pos > buf.len() {
            return Err(DecodeError::Truncated {
                offset: 0,
                needed: pos,
                len: buf.len(),
            });
        }
        Ok(Self { buf, pos })
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
                len: self.buf.len(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u16_le(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn i32_le(&mut self) -> Result<i32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    pub(crate) fn cstring(&mut self) -> Result<String, DecodeError> {
        let (text, next) = read_cstring(self.buf, self.pos)?;
        self.pos = next;
        Ok(text)
    }
}

/// Reads a null-terminated string starting at `start`.
///
/// The bytes up to the terminator are decoded as UTF-8. When that fails the
/// range is shrunk from the front one byte at a time until the rest decodes,
/// so a multi-byte sequence cut in half loses its leading fragment instead of
/// failing the whole reply. An undecodable range yields an empty string.
///
/// Returns the text and the index one past the terminator, regardless of how
/// many leading bytes were dropped.
pub fn read_cstring(buf: &[u8], start: usize) -> Result<(String, usize), DecodeError> {
    let tail = buf
        .get(start..)
        .ok_or(DecodeError::UnterminatedString { offset: start })?;
    let nul = tail
        .iter()
        .position(|&b| b == 0)
        .map(|rel| start + rel)
        .ok_or(DecodeError::UnterminatedString { offset: start })?;

    let text = (start..nul)
        .find_map(|from| std::str::from_utf8(&buf[from..nul]).ok())
        .unwrap_or_default()
        .to_owned();

    Ok((text, nul + 1))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
