//! Bounds-checked little-endian reads over a byte buffer.

use crate::error::{Result, VisualizerError};

/// Cursor over a borrowed byte buffer
///
/// Every read checks the remaining length first, so a truncated container
/// turns into a `Format` error instead of an out-of-bounds access.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Move the cursor to an absolute offset (may equal the buffer length)
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.bytes.len() {
            return Err(VisualizerError::Format(format!(
                "offset {} is past the end of a {}-byte buffer",
                pos,
                self.bytes.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(VisualizerError::Format(format!(
                "need {} bytes at offset {}, only {} left",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a u16 at an absolute offset
    pub fn u16_at(&mut self, offset: usize) -> Result<u16> {
        self.seek(offset)?;
        self.read_u16_le()
    }

    /// Read a u32 at an absolute offset
    pub fn u32_at(&mut self, offset: usize) -> Result<u32> {
        self.seek(offset)?;
        self.read_u32_le()
    }

    /// Scan forward from the cursor for `tag`, leaving the cursor just past it
    ///
    /// Returns the offset where the tag starts, or `None` when the buffer ends
    /// first. The cursor is left unchanged when the tag is not found.
    pub fn find_tag(&mut self, tag: &[u8]) -> Option<usize> {
        if tag.is_empty() {
            return None;
        }
        let haystack = self.bytes.get(self.pos..)?;
        let found = haystack.windows(tag.len()).position(|w| w == tag)?;
        let start = self.pos + found;
        self.pos = start + tag.len();
        Some(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let bytes = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&bytes);

        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_format_error() {
        let bytes = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&bytes);

        assert!(matches!(
            reader.read_u32_le(),
            Err(VisualizerError::Format(_))
        ));
        // Failed read leaves the cursor in place
        assert_eq!(reader.position(), 0);
        assert!(reader.u16_at(2).is_err());
        assert!(reader.seek(4).is_err());
    }

    #[test]
    fn test_find_tag() {
        let bytes = b"RIFFxxxxWAVEdata\x04\x00\x00\x00";
        let mut reader = ByteReader::new(bytes);
        reader.seek(4).unwrap();

        assert_eq!(reader.find_tag(b"data"), Some(12));
        assert_eq!(reader.position(), 16);
        assert_eq!(reader.read_u32_le().unwrap(), 4);
    }

    #[test]
    fn test_find_empty_tag() {
        let mut reader = ByteReader::new(b"data");
        assert_eq!(reader.find_tag(b""), None);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_find_tag_missing_keeps_cursor() {
        let bytes = b"RIFFxxxxWAVEdat";
        let mut reader = ByteReader::new(bytes);
        reader.seek(12).unwrap();

        assert_eq!(reader.find_tag(b"data"), None);
        assert_eq!(reader.position(), 12);
    }
}
