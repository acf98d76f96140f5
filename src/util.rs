use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Sniff the gzip magic without disturbing the stream position.
pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let pos = r.stream_position()?;
    let mut magic = [0u8; 2];
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n == 2 && magic == GZIP_MAGIC)
}

pub fn open_file(path: &std::path::Path) -> io::Result<File> {
    File::open(path)
}
