/// Conversion parameters shared by the sync and async readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Number of base readings per fragment (`L` in the wire format).
    /// Fragments are concatenated runs of this many packed bytes, with no
    /// delimiter or header; the length is not embedded in the stream.
    pub fragment_len: usize,
}

impl ConvertOptions {
    pub fn with_fragment_len(fragment_len: usize) -> Self {
        Self { fragment_len }
    }
}
