use crate::error::{ConvertError, IoContext};
use crate::fastq::FastqWriter;
use crate::options::ConvertOptions;
use crate::reader::FragmentReader;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Drive a full conversion: pull fragments until the source is exhausted,
/// writing each as a FASTQ record with 1-based numbering. Flushes the sink
/// and returns the number of fragments converted.
///
/// The reader's configured `fragment_len` must be non-zero: a zero-length
/// request always yields an empty fragment and never signals end of
/// stream, so the loop would not terminate.
pub fn convert<W: Write>(reader: &mut FragmentReader, sink: W) -> Result<u64, ConvertError> {
    let mut out = FastqWriter::new(sink);
    let mut converted = 0u64;
    while let Some(fragment) = reader.next_fragment()? {
        converted += 1;
        out.write_fragment(&fragment, converted)?;
    }
    out.flush()?;
    log::debug!("converted {converted} fragments");
    Ok(converted)
}

/// File-to-file conversion: gzip auto-detect on the input, buffered output.
pub fn convert_path<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    opts: ConvertOptions,
) -> Result<u64, ConvertError> {
    let mut reader = FragmentReader::from_path(input, opts)?;
    let out = File::create(output).map_err(|e| {
        ConvertError::io_err(
            e,
            IoContext {
                byte_pos: 0,
                fragment_num: 0,
            },
        )
    })?;
    convert(&mut reader, BufWriter::new(out))
}
