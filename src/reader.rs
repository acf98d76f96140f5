use crate::error::{ConvertError, IoContext};
use crate::fragment::Fragment;
use crate::options::ConvertOptions;
use crate::reading::BaseReading;
use crate::util::{looks_like_gzip, open_file};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// Sync packed-binary reader (plain/.gz), streaming.
pub struct FragmentReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    opts: ConvertOptions,
    byte_pos: u64,
    fragment_num: u64,
}

impl FragmentReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ConvertOptions) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let f = open_file(path).map_err(|e| {
            ConvertError::io_err(
                e,
                IoContext {
                    byte_pos: 0,
                    fragment_num: 0,
                },
            )
        })?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(ConvertError::io_err(
                    io::Error::new(
                        io::ErrorKind::Unsupported,
                        "gzipped input requires the `gzip` feature",
                    ),
                    IoContext {
                        byte_pos: 0,
                        fragment_num: 0,
                    },
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                use std::io::Cursor;
                // Own the Mmap inside Cursor to avoid self-ref problems
                let mmap = unsafe { Mmap::map(&f) }.map_err(|e| {
                    ConvertError::io_err(
                        e,
                        IoContext {
                            byte_pos: 0,
                            fragment_num: 0,
                        },
                    )
                })?;
                let cursor = Cursor::new(mmap);
                Box::new(BufReader::with_capacity(512 * 1024, cursor))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(256 * 1024, f))
            }
        };

        Ok(Self {
            src: Source::Path(path.to_path_buf()),
            rdr,
            opts,
            byte_pos: 0,
            fragment_num: 0,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ConvertOptions) -> Self {
        Self {
            src: Source::Reader,
            rdr: Box::new(reader),
            opts,
            byte_pos: 0,
            fragment_num: 0,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Read the next packed byte as a base reading.
    ///
    /// Returns `Ok(None)` when the stream is exhausted. Exhaustion is
    /// signalled out of band (a zero-length read), so a `0xFF` byte is
    /// decoded as the valid reading `(T, 63)` and never mistaken for end
    /// of stream.
    pub fn read_reading(&mut self) -> Result<Option<BaseReading>, ConvertError> {
        let mut byte = [0u8; 1];
        loop {
            match self.rdr.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.byte_pos += 1;
                    return Ok(Some(BaseReading::from_byte(byte[0])));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ConvertError::io_err(e, self.ctx())),
            }
        }
    }

    /// Read `count` readings from the stream as one fragment.
    ///
    /// Requesting zero readings returns an empty fragment without touching
    /// the source, whatever its state. Otherwise the three-way outcome is:
    /// `Ok(None)` when the stream was already exhausted (nothing left to
    /// convert), `TruncatedFragment` when it ends after at least one but
    /// fewer than `count` readings, and `Ok(Some(..))` when all `count`
    /// readings arrive.
    pub fn read_fragment(&mut self, count: usize) -> Result<Option<Fragment>, ConvertError> {
        if count == 0 {
            return Ok(Some(Fragment::default()));
        }

        let mut readings = Vec::with_capacity(count);
        while readings.len() < count {
            match self.read_reading()? {
                Some(reading) => readings.push(reading),
                None => break,
            }
        }

        if readings.is_empty() {
            return Ok(None);
        }
        if readings.len() < count {
            return Err(ConvertError::truncated(count, readings.len(), self.ctx()));
        }

        self.fragment_num += 1;
        Ok(Some(Fragment::new(readings)))
    }

    /// Read the next fragment of the configured length.
    pub fn next_fragment(&mut self) -> Result<Option<Fragment>, ConvertError> {
        self.read_fragment(self.opts.fragment_len)
    }

    /// Number of complete fragments read so far.
    pub fn fragments_read(&self) -> u64 {
        self.fragment_num
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            fragment_num: self.fragment_num,
        }
    }
}

impl Iterator for FragmentReader {
    type Item = Result<Fragment, ConvertError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_fragment().transpose()
    }
}
