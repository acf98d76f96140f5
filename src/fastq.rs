use crate::error::{ConvertError, IoContext, ValidationError};
use crate::fragment::Fragment;

use std::io::Write;

/// Render one fragment as its 4-line FASTQ block.
///
/// Fragment numbering is 1-based; a fragment number of zero is rejected
/// before anything is rendered. Lines 2 and 4 have the fragment's length.
pub fn render_fragment(fragment: &Fragment, fragment_num: u64) -> Result<String, ValidationError> {
    if fragment_num == 0 {
        return Err(ValidationError::FragmentNumberNotPositive(fragment_num));
    }

    let mut out = String::with_capacity(2 * fragment.len() + 32);
    out.push_str("@READ_");
    out.push_str(&fragment_num.to_string());
    out.push('\n');
    for reading in fragment {
        out.push(reading.base.as_char());
    }
    out.push('\n');
    out.push_str("+READ_");
    out.push_str(&fragment_num.to_string());
    out.push('\n');
    for reading in fragment {
        out.push(reading.score.to_fastq_char());
    }
    out.push('\n');
    Ok(out)
}

/// Text write side: renders fragments into a FASTQ character sink.
pub struct FastqWriter<W: Write> {
    w: W,
    byte_pos: u64,
    fragment_num: u64,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            byte_pos: 0,
            fragment_num: 0,
        }
    }

    /// Render and write the `fragment_num`-th fragment (1-based).
    pub fn write_fragment(
        &mut self,
        fragment: &Fragment,
        fragment_num: u64,
    ) -> Result<(), ConvertError> {
        let block = render_fragment(fragment, fragment_num)?;
        self.w
            .write_all(block.as_bytes())
            .map_err(|e| ConvertError::io_err(e, self.ctx()))?;
        self.byte_pos += block.len() as u64;
        self.fragment_num = fragment_num;
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
