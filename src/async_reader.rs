#![cfg(feature = "async")]

use crate::error::{ConvertError, IoContext};
use crate::fragment::Fragment;
use crate::options::ConvertOptions;
use crate::reading::BaseReading;

use async_compression::tokio::bufread::GzipDecoder;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncReadExt, AsyncSeekExt, BufReader, SeekFrom};

#[derive(Debug)]
pub enum AsyncSource {
    Path(PathBuf),
    Reader,
}

/// Async packed-binary reader (plain/.gz), streaming.
pub struct AsyncFragmentReader {
    src: AsyncSource,
    rdr: BufReader<Box<dyn AsyncBufRead + Unpin + Send>>,
    opts: ConvertOptions,
    byte_pos: u64,
    fragment_num: u64,
}

impl AsyncFragmentReader {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(
        path: P,
        opts: ConvertOptions,
    ) -> Result<Self, ConvertError> {
        let path = path.as_ref().to_path_buf();
        let mut f = File::open(&path).await.map_err(|e| {
            ConvertError::io_err(
                e,
                IoContext {
                    byte_pos: 0,
                    fragment_num: 0,
                },
            )
        })?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip_async(&mut f).await.unwrap_or(false);

        let inner: Box<dyn AsyncBufRead + Unpin + Send> = if is_gz {
            let gz = GzipDecoder::new(BufReader::with_capacity(256 * 1024, f));
            Box::new(BufReader::with_capacity(256 * 1024, gz))
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        let rdr = BufReader::with_capacity(256 * 1024, inner);

        Ok(Self {
            src: AsyncSource::Path(path),
            rdr,
            opts,
            byte_pos: 0,
            fragment_num: 0,
        })
    }

    /// Wrap any async `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R, opts: ConvertOptions) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let inner: Box<dyn AsyncBufRead + Unpin + Send> =
            Box::new(BufReader::with_capacity(256 * 1024, reader));
        let rdr = BufReader::with_capacity(256 * 1024, inner);
        Self {
            src: AsyncSource::Reader,
            rdr,
            opts,
            byte_pos: 0,
            fragment_num: 0,
        }
    }

    pub fn source(&self) -> &AsyncSource {
        &self.src
    }

    /// Read the next packed byte as a base reading (async).
    ///
    /// `Ok(None)` on clean end of stream, signalled out of band so that a
    /// `0xFF` byte still decodes to the valid reading `(T, 63)`. Each call
    /// is an await point, which is where a caller can cancel a conversion
    /// over a slow source.
    pub async fn read_reading(&mut self) -> Result<Option<BaseReading>, ConvertError> {
        let mut byte = [0u8; 1];
        loop {
            match self.rdr.read(&mut byte).await {
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

    /// Read `count` readings as one fragment (async). Same outcomes as the
    /// sync reader: zero requested readings return an empty fragment with
    /// no source read; an already-exhausted stream returns `Ok(None)`; a
    /// stream ending mid-fragment is a `TruncatedFragment` error.
    pub async fn read_fragment(&mut self, count: usize) -> Result<Option<Fragment>, ConvertError> {
        if count == 0 {
            return Ok(Some(Fragment::default()));
        }

        let mut readings = Vec::with_capacity(count);
        while readings.len() < count {
            match self.read_reading().await? {
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
    pub async fn next_fragment(&mut self) -> Result<Option<Fragment>, ConvertError> {
        self.read_fragment(self.opts.fragment_len).await
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            fragment_num: self.fragment_num,
        }
    }
}

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
