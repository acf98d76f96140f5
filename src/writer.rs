use crate::error::{ConvertError, IoContext};
use crate::fragment::Fragment;
use crate::reading::BaseReading;

use std::io::Write;

/// Binary write side: encodes base readings back into packed bytes.
pub struct FragmentWriter<W: Write> {
    w: W,
    byte_pos: u64,
    fragment_num: u64,
}

impl<W: Write> FragmentWriter<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            byte_pos: 0,
            fragment_num: 0,
        }
    }

    /// Encode and write exactly one packed byte. Sink failures propagate
    /// with the underlying `io::Error` as the source.
    pub fn write_reading(&mut self, reading: BaseReading) -> Result<(), ConvertError> {
        self.w
            .write_all(&[reading.to_byte()])
            .map_err(|e| ConvertError::io_err(e, self.ctx()))?;
        self.byte_pos += 1;
        Ok(())
    }

    /// Write each reading in order. An empty fragment writes zero bytes.
    pub fn write_fragment(&mut self, fragment: &Fragment) -> Result<(), ConvertError> {
        for reading in fragment {
            self.write_reading(*reading)?;
        }
        self.fragment_num += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.w.flush().map_err(|e| ConvertError::io_err(e, self.ctx()))
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            fragment_num: self.fragment_num,
        }
    }
}
