use crate::EncodeError;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_all(&[value])
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        if self.remaining() < data.len() {
            return Err(EncodeError::BufferTooSmall);
        }
        let end = self.pos + data.len();
        self.buf[self.pos..end].copy_from_slice(data);
        self.pos = end;
        Ok(())
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }
}

/// Runs `encode` against progressively larger scratch buffers, up to `limit`
/// octets, and returns the written bytes.
pub fn encode_to_vec<F>(limit: usize, mut encode: F) -> Result<Vec<u8>, EncodeError>
where
    F: FnMut(&mut Writer<'_>) -> Result<(), EncodeError>,
{
    let mut size = 64usize.min(limit.max(1));
    loop {
        let mut buf = vec![0u8; size];
        let mut w = Writer::new(&mut buf);
        match encode(&mut w) {
            Ok(()) => {
                let written_len = w.position();
                buf.truncate(written_len);
                return Ok(buf);
            }
            Err(EncodeError::BufferTooSmall) if size < limit => {
                size = size.saturating_mul(4).min(limit);
            }
            Err(e) => return Err(e),
        }
    }
}
